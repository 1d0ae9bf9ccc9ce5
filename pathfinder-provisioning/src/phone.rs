//! Telephone number display formatting.

/// Turns a national number and country code into a display string.
///
/// Invoked once per `TNData` entry while parsing a `queryNumber` response.
/// Any `Fn(u64, u16) -> String` closure implements this trait.
pub trait PhoneFormatter: Send + Sync {
    fn format(&self, national_number: u64, country_code: u16) -> String;
}

/// Default formatter producing E.164 strings such as `+15158675309`.
#[derive(Debug, Clone, Copy, Default)]
pub struct E164Formatter;

impl PhoneFormatter for E164Formatter {
    fn format(&self, national_number: u64, country_code: u16) -> String {
        format!("+{country_code}{national_number}")
    }
}

impl<F> PhoneFormatter for F
where
    F: Fn(u64, u16) -> String + Send + Sync,
{
    fn format(&self, national_number: u64, country_code: u16) -> String {
        self(national_number, country_code)
    }
}
