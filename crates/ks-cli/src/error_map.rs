use ks_core::KsError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> KsError {
    KsError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: KsError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).unwrap_or_else(|_| "\"\"".to_string())
    );
    1
}

pub(crate) fn map_cli_report_json(error: serde_json::Error) -> KsError {
    map_error("CLI_REPORT_JSON", error)
}
