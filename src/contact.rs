//! The contact link builder: turns the page's query parameters into
//! the `tel:`, `sms:` and WhatsApp deep links the visitor can tap.
//!
//! Everything in here is a total function of its string inputs. A
//! malformed phone number sanitizes to a possibly empty string rather
//! than being rejected; the page must never fail to render over bad
//! input. Validation beyond character filtering is out of scope.

use kstring::KString;

use crate::query::QueryString;
use crate::url_encoding::url_encode;

pub const DEFAULT_OWNER_NAME: &str = "Car Owner";
pub const DEFAULT_CONTACT_NUMBER: &str = "+91 8432445115";
pub const DEFAULT_PHONE_PLACEHOLDER: &str = "+1234567890";
pub const DEFAULT_EMERGENCY_NUMBER: &str = "112";
pub const DEFAULT_SPONSOR_LABEL: &str = "Sponsored by";

/// Keep only ASCII digits and `+`. The output is a subsequence of the
/// input; no length or country code checks. Idempotent.
pub fn sanitize_phone_number(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

/// Keep only ASCII digits; `wa.me` URLs take the number without `+`.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn default_sms_text(owner: &str) -> String {
    format!("Hi {owner}, I scanned this QR and need to contact you. \
             Please respond when possible.")
}

pub fn build_call_link(phone: &str) -> String {
    format!("tel:{phone}")
}

pub fn build_sms_link(phone: &str, text: &str) -> String {
    let encoded_text = url_encode(text);
    format!("sms:{phone}?body={encoded_text}")
}

pub fn build_whatsapp_link(phone: &str, text: &str) -> String {
    let digits_only_phone = digits_only(phone);
    let encoded_text = url_encode(text);
    format!("https://wa.me/{digits_only_phone}?text={encoded_text}")
}

/// Where the contact number comes from: baked into the deployment, or
/// taken from the `phone` query parameter (with a placeholder
/// fallback).
#[derive(Debug, Clone, PartialEq)]
pub enum PhoneSource {
    Fixed(KString),
    QueryParam,
}

/// Page behavior selected at composition time; the two constructors
/// cover the two ways the page gets deployed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactPageOptions {
    pub enable_whatsapp: bool,
    pub phone_source: PhoneSource,
}

impl ContactPageOptions {
    /// Fixed owner contact number, Call / Message / WhatsApp stack.
    pub fn quick_contact(contact_number: KString) -> Self {
        ContactPageOptions {
            enable_whatsapp: true,
            phone_source: PhoneSource::Fixed(contact_number),
        }
    }

    /// Number from the `phone` query parameter, Call and Message
    /// only.
    pub fn direct_contact() -> Self {
        ContactPageOptions {
            enable_whatsapp: false,
            phone_source: PhoneSource::QueryParam,
        }
    }
}

/// Display parameters resolved from the query string. Missing
/// parameters fall back to the defaults; a parameter that is present
/// but empty is passed through as-is.
#[derive(Debug, PartialEq)]
pub struct PageParams {
    pub owner: KString,
    pub sponsor_label: KString,
    pub text: KString,
    /// Raw `phone` parameter; only consulted by
    /// `PhoneSource::QueryParam`.
    pub phone: Option<KString>,
}

impl PageParams {
    pub fn from_query(query: &QueryString) -> Self {
        let owner = query.get("owner").unwrap_or(DEFAULT_OWNER_NAME);
        let sponsor_label = query.get("sponsorLabel").unwrap_or(DEFAULT_SPONSOR_LABEL);
        let text = match query.get("text") {
            Some(text) => KString::from_ref(text),
            None => KString::from_string(default_sms_text(owner)),
        };
        PageParams {
            owner: KString::from_ref(owner),
            sponsor_label: KString::from_ref(sponsor_label),
            text,
            phone: query.get("phone").map(KString::from_ref),
        }
    }
}

/// The four URIs the view places into anchor hrefs. Computed fresh on
/// each render; nothing is cached or mutated.
#[derive(Debug, PartialEq)]
pub struct ContactLinks {
    pub call: String,
    pub emergency: String,
    pub sms: String,
    pub whatsapp: Option<String>,
}

impl ContactLinks {
    pub fn build(options: &ContactPageOptions, params: &PageParams) -> Self {
        let raw_number = match &options.phone_source {
            PhoneSource::Fixed(number) => number.as_str(),
            PhoneSource::QueryParam =>
                params.phone.as_deref().unwrap_or(DEFAULT_PHONE_PLACEHOLDER),
        };
        let contact_number = sanitize_phone_number(raw_number);
        ContactLinks {
            call: build_call_link(&contact_number),
            emergency: build_call_link(&sanitize_phone_number(DEFAULT_EMERGENCY_NUMBER)),
            sms: build_sms_link(&contact_number, &params.text),
            whatsapp: options.enable_whatsapp.then(
                || build_whatsapp_link(&contact_number, &params.text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url_encoding::url_decode;

    fn query(s: &str) -> QueryString {
        QueryString::from_str(s).expect("test query strings are well-formed")
    }

    #[test]
    fn t_sanitize() {
        assert_eq!(sanitize_phone_number("+91 8432445115"), "+918432445115");
        assert_eq!(sanitize_phone_number("555-0100"), "5550100");
        assert_eq!(sanitize_phone_number("(022) 123 45 67"), "0221234567");
        assert_eq!(sanitize_phone_number("call me"), "");
        assert_eq!(sanitize_phone_number(""), "");
        // not just a leading +; every char goes through the same filter
        assert_eq!(sanitize_phone_number("12+34"), "12+34");
    }

    #[test]
    fn t_sanitize_idempotent() {
        for s in ["+41 44 668 18 00", "abc", "", "++--12"] {
            let once = sanitize_phone_number(s);
            assert_eq!(sanitize_phone_number(&once), once);
        }
    }

    #[test]
    fn t_sanitize_is_subsequence() {
        let input = "tel. +41 (0)44/668-18-00 ext. 9";
        let output = sanitize_phone_number(input);
        let filtered: String =
            input.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
        assert_eq!(output, filtered);
    }

    #[test]
    fn t_sms_link() {
        let link = build_sms_link("+918432445115", "Hello there & hi!");
        assert!(link.starts_with("sms:+918432445115?body="));
        let body = link.split_once("?body=").unwrap().1;
        assert_eq!(url_decode(body).unwrap(), "Hello there & hi!");
    }

    #[test]
    fn t_whatsapp_link() {
        let link = build_whatsapp_link("+918432445115", "Hi");
        assert_eq!(link, "https://wa.me/918432445115?text=Hi");
        // no '+' or other non-digits before the '?'
        let before_query = link.strip_prefix("https://wa.me/").unwrap()
            .split_once('?').unwrap().0;
        assert!(before_query.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn t_params_defaults() {
        let params = PageParams::from_query(&query(""));
        assert_eq!(params.owner.as_str(), "Car Owner");
        assert_eq!(params.sponsor_label.as_str(), "Sponsored by");
        assert!(params.text.contains("Hi Car Owner,"));
        assert_eq!(params.phone, None);
    }

    #[test]
    fn t_params_owner_in_default_text() {
        let params = PageParams::from_query(&query("owner=Jane"));
        assert_eq!(params.owner.as_str(), "Jane");
        assert!(params.text.starts_with("Hi Jane,"));
    }

    #[test]
    fn t_params_explicit_text_overrides_template() {
        let params = PageParams::from_query(&query("owner=Jane&text=Hello"));
        assert_eq!(params.text.as_str(), "Hello");
    }

    #[test]
    fn t_params_empty_is_not_absent() {
        // present-but-empty passes through; only absence defaults
        let params = PageParams::from_query(&query("owner=&text="));
        assert_eq!(params.owner.as_str(), "");
        assert_eq!(params.text.as_str(), "");
    }

    #[test]
    fn t_links_quick_contact() {
        let options = ContactPageOptions::quick_contact(
            KString::from_static(DEFAULT_CONTACT_NUMBER));
        let params = PageParams::from_query(&query(""));
        let links = ContactLinks::build(&options, &params);
        assert_eq!(links.call, "tel:+918432445115");
        assert_eq!(links.emergency, "tel:112");
        assert!(links.sms.starts_with("sms:+918432445115?body="));
        assert!(links.whatsapp.as_ref().unwrap()
                .starts_with("https://wa.me/918432445115?text="));
    }

    #[test]
    fn t_links_direct_contact() {
        let options = ContactPageOptions::direct_contact();
        let params = PageParams::from_query(&query("phone=555-0100"));
        let links = ContactLinks::build(&options, &params);
        assert_eq!(links.call, "tel:5550100");
        assert_eq!(links.sms.split_once("?body=").unwrap().0, "sms:5550100");
        assert_eq!(links.whatsapp, None);
    }

    #[test]
    fn t_links_direct_contact_placeholder() {
        let options = ContactPageOptions::direct_contact();
        let params = PageParams::from_query(&query(""));
        let links = ContactLinks::build(&options, &params);
        assert_eq!(links.call, "tel:+1234567890");
    }

    #[test]
    fn t_emergency_ignores_query() {
        let options = ContactPageOptions::direct_contact();
        let params = PageParams::from_query(
            &query("phone=999&owner=X&text=Y&sponsorLabel=Z"));
        let links = ContactLinks::build(&options, &params);
        assert_eq!(links.emergency, "tel:112");
    }

    #[test]
    fn t_sms_body_roundtrips_unicode() {
        let params = PageParams::from_query(
            &query("text=Gr%C3%BCezi%2C%20mein%20Auto%21"));
        let options = ContactPageOptions::direct_contact();
        let links = ContactLinks::build(&options, &params);
        let body = links.sms.split_once("?body=").unwrap().1;
        assert_eq!(url_decode(body).unwrap(), "Grüezi, mein Auto!");
    }
}
