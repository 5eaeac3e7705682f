use proptest::prelude::*;
use vehicle_rental_booking::application::booking_form::BookingForm;
use vehicle_rental_booking::domain::error::{BookingRejection, UnavailabilityReason};
use vehicle_rental_booking::domain::model::{
    BookingRequest, BookingStatus, DateRange, Money, RequesterIdentity, Vehicle, VehicleId,
};
use vehicle_rental_booking::domain::port::AvailabilityOracle;
use vehicle_rental_booking::domain::service::{BookingEngine, BookingPolicy};

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use std::sync::Mutex;

// 常に同じ答えを返すオラクル
struct FixedOracle(bool);

impl AvailabilityOracle for FixedOracle {
    fn is_available(&self, _vehicle_id: &VehicleId, _start_date: &str, _end_date: &str) -> bool {
        self.0
    }
}

// 問い合わせ内容を記録するオラクル
struct RecordingOracle {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingOracle {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl AvailabilityOracle for RecordingOracle {
    fn is_available(&self, _vehicle_id: &VehicleId, start_date: &str, end_date: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push((start_date.to_string(), end_date.to_string()));
        true
    }
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn vehicle_priced(cents: i64) -> Vehicle {
    Vehicle::new(
        VehicleId::new("porsche-911").unwrap(),
        "Porsche".to_string(),
        "911".to_string(),
        Money::eur(Decimal::new(cents, 2)),
        vec!["porsche-911.jpg".to_string()],
    )
    .unwrap()
}

fn guest() -> RequesterIdentity {
    RequesterIdentity::Guest {
        name: "Camille".to_string(),
        phone: "0612345678".to_string(),
    }
}

fn request(vehicle: Vehicle, start: NaiveDate, end: NaiveDate) -> BookingRequest {
    BookingRequest::new(vehicle, DateRange::new(start, end), guest())
}

// 事前予約期限のプロパティベーステスト
proptest! {
    /// 基準日から7日未満に始まる予約は、オラクルの答えにかかわらず利用不可として却下される
    #[test]
    fn test_start_before_advance_floor_is_unavailable(
        today_offset in 0i64..3650,
        start_offset in -30i64..7,
        length in 1i64..8,
        oracle_answer in any::<bool>(),
    ) {
        let today = base_date() + Duration::days(today_offset);
        let start = today + Duration::days(start_offset);
        let engine = BookingEngine::default();

        let result = engine.evaluate_booking(
            &request(vehicle_priced(30_000), start, start + Duration::days(length)),
            today,
            &FixedOracle(oracle_answer),
        );

        prop_assert_eq!(
            result.unwrap_err(),
            BookingRejection::VehicleUnavailable(UnavailabilityReason::InsufficientAdvanceNotice {
                earliest_start: today + Duration::days(7),
            })
        );
    }

    /// 事前予約期限を満たしても、オラクルが利用不可と答えれば却下される
    #[test]
    fn test_oracle_refusal_is_unavailable(
        start_offset in 7i64..120,
        length in 1i64..8,
    ) {
        let today = base_date();
        let start = today + Duration::days(start_offset);

        let result = BookingEngine::default().evaluate_booking(
            &request(vehicle_priced(30_000), start, start + Duration::days(length)),
            today,
            &FixedOracle(false),
        );

        prop_assert_eq!(
            result.unwrap_err(),
            BookingRejection::VehicleUnavailable(UnavailabilityReason::AlreadyBooked)
        );
    }

    /// 最大日数を超える期間は却下される
    #[test]
    fn test_period_longer_than_a_week_is_rejected(
        start_offset in 7i64..120,
        length in 8i64..60,
    ) {
        let today = base_date();
        let start = today + Duration::days(start_offset);

        let result = BookingEngine::default().evaluate_booking(
            &request(vehicle_priced(30_000), start, start + Duration::days(length)),
            today,
            &FixedOracle(true),
        );

        prop_assert_eq!(
            result.unwrap_err(),
            BookingRejection::RentalPeriodTooLong { max_days: 7 }
        );
    }
}

// 料金計算のプロパティベーステスト
proptest! {
    /// 終了日が開始日以前なら日数は1日
    #[test]
    fn test_end_not_after_start_counts_one_day(
        start_offset in 0i64..3650,
        backwards in 0i64..30,
    ) {
        let start = base_date() + Duration::days(start_offset);
        let end = start - Duration::days(backwards);
        let vehicle = vehicle_priced(25_000);

        let booking = request(vehicle.clone(), start, end);
        let quote = BookingEngine::default().quote(&vehicle, &booking.period());

        prop_assert_eq!(booking.duration_days(), 1);
        prop_assert_eq!(quote.rental_days, 1);
        prop_assert_eq!(quote.total, vehicle.price());
    }

    /// 合計金額は常に1日あたりの料金 × 日数と等しい
    #[test]
    fn test_total_is_price_times_days(
        cents in 1i64..1_000_000,
        start_offset in 0i64..3650,
        length in 1i64..60,
    ) {
        let start = base_date() + Duration::days(start_offset);
        let vehicle = vehicle_priced(cents);
        let period = DateRange::new(start, start + Duration::days(length));

        let quote = BookingEngine::default().quote(&vehicle, &period);

        prop_assert_eq!(quote.rental_days as i64, length);
        prop_assert_eq!(
            quote.total.amount(),
            Decimal::new(cents, 2) * Decimal::from(length)
        );
    }
}

// 予約判定のプロパティベーステスト
proptest! {
    /// ゲストの名前が空白なら、電話番号があっても名前不足で却下される
    #[test]
    fn test_blank_guest_name_is_rejected(
        name in "[ \t]{0,5}",
        phone in "0[67][0-9]{8}",
    ) {
        let today = base_date();
        let start = today + Duration::days(8);
        let booking = BookingRequest::new(
            vehicle_priced(30_000),
            DateRange::new(start, start + Duration::days(1)),
            RequesterIdentity::Guest { name, phone },
        );

        let result = BookingEngine::default().evaluate_booking(&booking, today, &FixedOracle(true));

        prop_assert_eq!(result.unwrap_err(), BookingRejection::MissingGuestName);
    }

    /// 基準日+8日から1日間の予約は、空きがあればUpcomingとして受け付けられ金額は1日分
    #[test]
    fn test_one_day_booking_after_floor_is_accepted(
        cents in 1i64..1_000_000,
        today_offset in 0i64..3650,
    ) {
        let today = base_date() + Duration::days(today_offset);
        let start = today + Duration::days(8);
        let vehicle = vehicle_priced(cents);

        let record = BookingEngine::default()
            .evaluate_booking(
                &request(vehicle.clone(), start, start + Duration::days(1)),
                today,
                &FixedOracle(true),
            )
            .unwrap();

        prop_assert_eq!(record.status(), BookingStatus::Upcoming);
        prop_assert_eq!(record.amount(), vehicle.price());
        prop_assert_eq!(record.vehicle_id(), vehicle.id());
        prop_assert!(record.is_guest_booking());
    }

    /// 同じ入力には同じ判定を返す
    #[test]
    fn test_evaluation_is_deterministic(
        start_offset in -10i64..30,
        length in -3i64..12,
        oracle_answer in any::<bool>(),
    ) {
        let today = base_date();
        let start = today + Duration::days(start_offset);
        let booking = request(vehicle_priced(30_000), start, start + Duration::days(length));
        let engine = BookingEngine::default();
        let oracle = FixedOracle(oracle_answer);

        let first = engine.evaluate_booking(&booking, today, &oracle);
        let second = engine.evaluate_booking(&booking, today, &oracle);

        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.period(), b.period());
                prop_assert_eq!(a.amount(), b.amount());
                prop_assert_eq!(a.status(), b.status());
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "decisions differ for identical input"),
        }
    }

    /// オラクルには正規化済みの期間がISO形式で渡される
    #[test]
    fn test_oracle_receives_normalized_iso_dates(
        start_offset in 7i64..60,
        backwards in 0i64..5,
    ) {
        let today = base_date();
        let start = today + Duration::days(start_offset);
        let oracle = RecordingOracle::new();

        let record = BookingEngine::default()
            .evaluate_booking(
                &request(vehicle_priced(30_000), start, start - Duration::days(backwards)),
                today,
                &oracle,
            )
            .unwrap();

        let expected_end = start + Duration::days(1);
        prop_assert_eq!(
            oracle.calls(),
            vec![(
                start.format("%Y-%m-%d").to_string(),
                expected_end.format("%Y-%m-%d").to_string(),
            )]
        );
        prop_assert_eq!(record.period(), DateRange::new(start, expected_end));
    }
}

// 予約フォームのプロパティベーステスト
proptest! {
    /// 開始日を終了日以降に動かすと終了日は開始日の翌日になり、空き状況が再確認される
    #[test]
    fn test_form_start_change_advances_end_and_rechecks(
        shift in 1i64..30,
    ) {
        let today = base_date();
        let oracle = RecordingOracle::new();
        let mut form = BookingForm::open(
            vehicle_priced(30_000),
            BookingPolicy::default(),
            today,
            None,
            &oracle,
        );
        let initial_end = form.period().end_date();

        let new_start = initial_end + Duration::days(shift - 1);
        form.change_start_date(new_start, &oracle);

        prop_assert_eq!(form.period().start_date(), new_start);
        prop_assert_eq!(form.period().end_date(), new_start + Duration::days(1));
        prop_assert_eq!(oracle.calls().len(), 2);
        prop_assert!(form.is_available_for_current_dates());
    }
}
