use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// ITU-T E.164 assigned country calling codes, grouped by length.
const CALLING_CODES: &[&str] = &[
    "1", "7", "20", "27", "30", "31", "32", "33", "34", "36", "39", "40", "41", "43", "44", "45",
    "46", "47", "48", "49", "51", "52", "53", "54", "55", "56", "57", "58", "60", "61", "62", "63",
    "64", "65", "66", "81", "82", "84", "86", "90", "91", "92", "93", "94", "95", "98", "211",
    "212", "213", "216", "218", "220", "221", "222", "223", "224", "225", "226", "227", "228",
    "229", "230", "231", "232", "233", "234", "235", "236", "237", "238", "239", "240", "241",
    "242", "243", "244", "245", "246", "247", "248", "249", "250", "251", "252", "253", "254",
    "255", "256", "257", "258", "260", "261", "262", "263", "264", "265", "266", "267", "268",
    "269", "290", "291", "297", "298", "299", "350", "351", "352", "353", "354", "355", "356",
    "357", "358", "359", "370", "371", "372", "373", "374", "375", "376", "377", "378", "379",
    "380", "381", "382", "383", "385", "386", "387", "389", "420", "421", "423", "500", "501",
    "502", "503", "504", "505", "506", "507", "508", "509", "590", "591", "592", "593", "594",
    "595", "596", "597", "598", "599", "670", "672", "673", "674", "675", "676", "677", "678",
    "679", "680", "681", "682", "683", "685", "686", "687", "688", "689", "690", "691", "692",
    "800", "808", "850", "852", "853", "855", "856", "870", "878", "880", "881", "882", "883",
    "886", "888", "960", "961", "962", "963", "964", "965", "966", "967", "968", "970", "971",
    "972", "973", "974", "975", "976", "977", "979", "992", "993", "994", "995", "996", "998",
];

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 .\-()]+$").unwrap());

const MIN_DIGITS: usize = 6;
const MAX_DIGITS: usize = 15;

/// Result of splitting a raw phone string into an international calling
/// code and the remaining local number. Both parts are `None` for input
/// with no content; `prefix` carries the code digits without the `+`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneComponents {
    pub prefix: Option<String>,
    pub local: Option<String>,
}

impl PhoneComponents {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Splits a raw phone string on the calling-code boundary.
///
/// The boundary policy is a longest-match lookup (three digits down to
/// one) against the assigned E.164 calling codes, applied to the digits
/// after a leading `+`. Input without a leading `+`, or whose digits
/// match no assigned code, degrades to `local` carrying the whole
/// trimmed input. A recognized split rejoins as `"+" + prefix + local`,
/// byte-identical to the trimmed input.
pub fn split_number(raw: &str) -> PhoneComponents {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "+" {
        return PhoneComponents::empty();
    }

    let Some(rest) = trimmed.strip_prefix('+') else {
        return PhoneComponents {
            prefix: None,
            local: Some(trimmed.to_string()),
        };
    };

    for len in (1..=3).rev() {
        if rest.len() < len || !rest.is_char_boundary(len) {
            continue;
        }
        let candidate = &rest[..len];
        if !candidate.bytes().all(|byte| byte.is_ascii_digit()) {
            continue;
        }
        if CALLING_CODES.contains(&candidate) {
            return PhoneComponents {
                prefix: Some(candidate.to_string()),
                local: Some(rest[len..].to_string()),
            };
        }
    }

    PhoneComponents {
        prefix: None,
        local: Some(trimmed.to_string()),
    }
}

/// Structural well-formedness: optional leading `+`, digits with common
/// separators, and a plausible digit count.
pub(crate) fn is_well_formed(text: &str) -> bool {
    let trimmed = text.trim();
    if !PHONE_PATTERN.is_match(trimmed) {
        return false;
    }
    let digits = trimmed.bytes().filter(u8::is_ascii_digit).count();
    (MIN_DIGITS..=MAX_DIGITS).contains(&digits)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPhoneNumber {
    pub input: String,
}

impl fmt::Display for InvalidPhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a well-formed phone number: {:?}", self.input)
    }
}

impl std::error::Error for InvalidPhoneNumber {}

/// A phone number validated at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(number: impl Into<String>) -> Result<Self, InvalidPhoneNumber> {
        let number = number.into();
        if !is_well_formed(&number) {
            return Err(InvalidPhoneNumber { input: number });
        }
        Ok(Self(number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// The number with all formatting stripped, digits only.
    pub fn digits_only(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }

    /// Splits this number on the calling-code boundary.
    pub fn components(&self) -> PhoneComponents {
        split_number(&self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        PhoneNumber::new(raw).map_err(serde::de::Error::custom)
    }
}
