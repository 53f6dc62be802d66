//! Status enums shared between the auth API and the admin tool.

use serde::{Deserialize, Serialize};

/// Account status reported by the auth API.
///
/// New registrations are submitted as `Inactive` and become `Active` once
/// the emailed OTP is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    #[default]
    Inactive,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("invalid user status: {s}")),
        }
    }
}

/// Purpose of a one-time password resend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    /// Email verification after signup.
    Verification,
    /// Password reset after a forgot-password request.
    PasswordReset,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_status_roundtrip_through_str() {
        for status in [UserStatus::Active, UserStatus::Inactive] {
            let parsed: UserStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("banned".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_otp_purpose_wire_name() {
        let json = serde_json::to_string(&OtpPurpose::Verification).unwrap();
        assert_eq!(json, "\"verification\"");
    }
}
