pub mod ids;
pub mod logging;

pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
