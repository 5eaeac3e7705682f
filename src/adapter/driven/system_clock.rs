use crate::domain::port::Clock;
use chrono::{Local, NaiveDate};

/// システム時計
/// ローカルタイムゾーンの今日の日付を返す
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
