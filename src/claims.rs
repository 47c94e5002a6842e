use chrono::DateTime;
use chrono::SubsecRound;
use chrono::Utc;

/// Token payload: who logged in and when the token stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    user: String,
    #[serde(with = "timestamp")]
    expiration: DateTime<Utc>,
}

impl Claims {
    pub fn new(user: impl Into<String>, issued: DateTime<Utc>, window: std::time::Duration) -> Self {
        let window = chrono::Duration::from_std(window).unwrap_or(chrono::Duration::MAX);
        Self {
            user: user.into(),
            expiration: issued
                .checked_add_signed(window)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
                .trunc_subsecs(6),
        }
    }
    pub fn user(&self) -> &str {
        &self.user
    }
    pub fn expiration(&self) -> DateTime<Utc> {
        self.expiration
    }
    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration
    }
}

/// `expiration` travels as a naive UTC string, `2024-01-31 12:00:00.250000`.
/// The fraction is left out when it is zero.
mod timestamp {
    use chrono::DateTime;
    use chrono::NaiveDateTime;
    use chrono::Utc;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    use chrono::Timelike;

    const WHOLE: &str = "%Y-%m-%d %H:%M:%S";
    const FRACTIONAL: &str = "%Y-%m-%d %H:%M:%S%.6f";
    const PARSE: &str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time.nanosecond() {
            0 => serializer.collect_str(&time.format(WHOLE)),
            _ => serializer.collect_str(&time.format(FRACTIONAL)),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, PARSE)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
