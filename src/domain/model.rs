// ドメインモデル（エンティティと値オブジェクト）

mod value_objects;
mod vehicle;
mod user;
mod booking;

pub use value_objects::{
    VehicleId, UserId, BookingId,
    Currency, Money,
    DateRange,
    BookingStatus,
    add_days, saturating_add_days,
};

pub use vehicle::Vehicle;
pub use user::User;
pub use booking::{BookingRecord, BookingRequest, GuestDetails, RequesterIdentity};
