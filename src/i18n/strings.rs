/// All localized user-facing labels for a locale.
///
/// One constant per locale replaces per-call default literals; the set is
/// checked once at startup by `StringsValidator`.
#[derive(Debug, Clone)]
pub struct SiteStrings {
    // ==================== Navigation ====================
    pub nav_home: &'static str,
    pub nav_services: &'static str,
    pub nav_about: &'static str,
    pub nav_career: &'static str,
    pub nav_contact: &'static str,

    /// Label of the implicit search entry appended by `derive_items`
    pub nav_search: &'static str,

    /// Accessible label of the language switcher
    /// Placeholders: {language}
    pub language_switch: &'static str,

    /// Shown when a page's title is missing
    pub fallback_title: &'static str,

    // ==================== Carousel ====================
    pub carousel_previous: &'static str,
    pub carousel_next: &'static str,

    /// Placeholders: {current}, {total}
    pub carousel_position: &'static str,

    // ==================== Consent ====================
    pub consent_banner: &'static str,
    pub consent_accept_all: &'static str,
    pub consent_necessary_only: &'static str,

    // ==================== Media ====================
    /// Placeholders: {author}
    pub photo_attribution: &'static str,

    /// Alt text of the placeholder image used when no provider is configured
    pub photo_placeholder_alt: &'static str,

    // ==================== Contact Form ====================
    pub form_name_required: &'static str,
    pub form_email_invalid: &'static str,

    /// Placeholders: {min}
    pub form_message_too_short: &'static str,
    pub form_phone_invalid: &'static str,
    pub form_submit_success: &'static str,

    // ==================== Errors ====================
    /// Inline message for transient fetch failures
    pub error_transient: &'static str,

    /// Label of the manual retry action shown next to `error_transient`
    pub error_retry: &'static str,
    pub error_validation: &'static str,

    /// Generic message rendered by the page boundary
    pub error_unexpected: &'static str,
}

// ==================== German Strings ====================

/// German strings (default locale)
pub const GERMAN_STRINGS: SiteStrings = SiteStrings {
    nav_home: "Startseite",
    nav_services: "Leistungen",
    nav_about: "Über uns",
    nav_career: "Karriere",
    nav_contact: "Kontakt",
    nav_search: "Suche",
    language_switch: "Sprache wechseln: {language}",
    fallback_title: "Ohne Titel",

    carousel_previous: "Vorherige Folie",
    carousel_next: "Nächste Folie",
    carousel_position: "Folie {current} von {total}",

    consent_banner: "Wir verwenden Cookies, um unsere Website zu verbessern. \
Notwendige Cookies sind immer aktiv; Analyse-Cookies nur mit Ihrer Zustimmung.",
    consent_accept_all: "Alle akzeptieren",
    consent_necessary_only: "Nur notwendige",

    photo_attribution: "Foto von {author} auf Unsplash",
    photo_placeholder_alt: "Platzhalterbild",

    form_name_required: "Bitte geben Sie Ihren Namen ein.",
    form_email_invalid: "Bitte geben Sie eine gültige E-Mail-Adresse ein.",
    form_message_too_short: "Ihre Nachricht muss mindestens {min} Zeichen lang sein.",
    form_phone_invalid: "Bitte geben Sie eine gültige Telefonnummer ein.",
    form_submit_success: "Vielen Dank! Wir melden uns in Kürze bei Ihnen.",

    error_transient: "Die Inhalte konnten nicht geladen werden.",
    error_retry: "Erneut versuchen",
    error_validation: "Bitte überprüfen Sie Ihre Eingaben.",
    error_unexpected: "Etwas ist schiefgelaufen. Bitte versuchen Sie es später erneut.",
};

// ==================== English Strings ====================

/// English strings
pub const ENGLISH_STRINGS: SiteStrings = SiteStrings {
    nav_home: "Home",
    nav_services: "Services",
    nav_about: "About us",
    nav_career: "Careers",
    nav_contact: "Contact",
    nav_search: "Search",
    language_switch: "Switch language: {language}",
    fallback_title: "Untitled",

    carousel_previous: "Previous slide",
    carousel_next: "Next slide",
    carousel_position: "Slide {current} of {total}",

    consent_banner: "We use cookies to improve our website. \
Necessary cookies are always active; analytics cookies only with your consent.",
    consent_accept_all: "Accept all",
    consent_necessary_only: "Necessary only",

    photo_attribution: "Photo by {author} on Unsplash",
    photo_placeholder_alt: "Placeholder image",

    form_name_required: "Please enter your name.",
    form_email_invalid: "Please enter a valid email address.",
    form_message_too_short: "Your message must be at least {min} characters long.",
    form_phone_invalid: "Please enter a valid phone number.",
    form_submit_success: "Thank you! We will get back to you shortly.",

    error_transient: "The content could not be loaded.",
    error_retry: "Try again",
    error_validation: "Please check your input.",
    error_unexpected: "Something went wrong. Please try again later.",
};

impl SiteStrings {
    /// Every label paired with its field name, for validation.
    pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("nav_home", self.nav_home),
            ("nav_services", self.nav_services),
            ("nav_about", self.nav_about),
            ("nav_career", self.nav_career),
            ("nav_contact", self.nav_contact),
            ("nav_search", self.nav_search),
            ("language_switch", self.language_switch),
            ("fallback_title", self.fallback_title),
            ("carousel_previous", self.carousel_previous),
            ("carousel_next", self.carousel_next),
            ("carousel_position", self.carousel_position),
            ("consent_banner", self.consent_banner),
            ("consent_accept_all", self.consent_accept_all),
            ("consent_necessary_only", self.consent_necessary_only),
            ("photo_attribution", self.photo_attribution),
            ("photo_placeholder_alt", self.photo_placeholder_alt),
            ("form_name_required", self.form_name_required),
            ("form_email_invalid", self.form_email_invalid),
            ("form_message_too_short", self.form_message_too_short),
            ("form_phone_invalid", self.form_phone_invalid),
            ("form_submit_success", self.form_submit_success),
            ("error_transient", self.error_transient),
            ("error_retry", self.error_retry),
            ("error_validation", self.error_validation),
            ("error_unexpected", self.error_unexpected),
        ]
    }
}

/// Substitute `{name}` placeholders in a label.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{}}}", name), value)
        })
}
