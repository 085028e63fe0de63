/// Error code registry for pledge-finance
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Validation errors
/// - 3000-3999: Payout link errors
/// - 4000-4999: Finance API errors
/// - 5000-5999: Cancellation
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_PARSE_ERROR: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1003;
    pub const CONFIG_HTTP_CLIENT: u16 = 1004;

    // Validation errors (2000-2999)
    pub const VALIDATION_GENERIC: u16 = 2000;
    pub const VALIDATION_NEGATIVE_AMOUNT: u16 = 2001;
    pub const VALIDATION_UNKNOWN_VIEW_MODE: u16 = 2002;
    pub const VALIDATION_INVALID_MONEY: u16 = 2003;
    pub const VALIDATION_MISSING_ACCOUNT: u16 = 2004;

    // Payout link errors (3000-3999)
    pub const PAYOUT_LINK_GENERIC: u16 = 3000;
    pub const PAYOUT_LINK_REQUEST_FAILED: u16 = 3001;
    pub const PAYOUT_LINK_REJECTED: u16 = 3002;
    pub const PAYOUT_LINK_INVALID_URL: u16 = 3003;
    pub const PAYOUT_ACCOUNT_CREATE_FAILED: u16 = 3004;

    // Finance API errors (4000-4999)
    pub const API_GENERIC: u16 = 4000;
    pub const API_REQUEST_FAILED: u16 = 4001;
    pub const API_BAD_STATUS: u16 = 4002;
    pub const API_INVALID_RESPONSE: u16 = 4003;
    pub const API_UNAUTHORIZED: u16 = 4004;

    // Cancellation (5000-5999)
    pub const CANCELLED: u16 = 5000;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Failed to parse configuration",
        1003 => "Invalid value in configuration",
        1004 => "Failed to build HTTP client",

        2000 => "Generic validation error",
        2001 => "Pledge amount is negative",
        2002 => "Unknown finance view mode",
        2003 => "Invalid money amount",
        2004 => "Payout account is required for this action",

        3000 => "Payout link unavailable",
        3001 => "Payout link request failed",
        3002 => "Payout provider rejected the link request",
        3003 => "Payout provider returned an invalid URL",
        3004 => "Failed to create payout account",

        4000 => "Generic finance API error",
        4001 => "Finance API request failed",
        4002 => "Finance API returned an error status",
        4003 => "Finance API returned an invalid response",
        4004 => "Finance API rejected the credentials",

        5000 => "Request cancelled",

        _ => "Unknown error code",
    }
}
