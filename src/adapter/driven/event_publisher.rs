use crate::domain::event::DomainEvent;
use crate::domain::port::{EventPublisher, PublisherError};

/// コンソールイベント発行者
/// ドメインイベントをコンソールに出力する
pub struct ConsoleEventPublisher;

impl ConsoleEventPublisher {
    /// 新しいコンソールイベント発行者を作成
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for ConsoleEventPublisher {
    fn publish(&self, event: &DomainEvent) -> Result<(), PublisherError> {
        match event {
            DomainEvent::BookingPlaced(e) => {
                println!("🚗 [イベント] 予約登録");
                println!("  予約ID: {}", e.booking_id);
                println!("  車両: {} ({})", e.vehicle_name, e.vehicle_id);
                println!("  期間: {} 〜 {}", e.period.start_iso(), e.period.end_iso());
                println!("  合計金額: {}", e.amount);
                if e.guest_booking {
                    println!("  ゲスト予約: 管理者からの連絡が必要です");
                }
                println!("  相関ID: {}", e.correlation_id);
                println!("  発生日時: {}", e.occurred_at.format("%Y-%m-%d %H:%M:%S"));
            }
        }
        println!(); // 空行を追加
        Ok(())
    }
}
