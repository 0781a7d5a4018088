/// Process exit codes of `qgate-report`.
pub mod exit {
    pub const SUCCESS: i32 = 0;
    pub const REPORT_FAILURE: i32 = 1;
    pub const CONFIG_FAILURE: i32 = 2;
}
