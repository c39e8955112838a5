//! Shared domain enums

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LoanStatus
// ---------------------------------------------------------------------------

/// Availability of a single book copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    #[default]
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl LoanStatus {
    /// One-letter code stored in `book_instances.status`
    pub fn code(self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "m" => Some(LoanStatus::Maintenance),
            "o" => Some(LoanStatus::OnLoan),
            "a" => Some(LoanStatus::Available),
            "r" => Some(LoanStatus::Reserved),
            _ => None,
        }
    }

    /// Whether a copy in this status may be moved to `target`.
    ///
    /// Available and Maintenance are reachable from anywhere; a copy can only
    /// be lent or reserved while it sits on the shelf.
    pub fn can_transition_to(self, target: LoanStatus) -> bool {
        match target {
            LoanStatus::Available | LoanStatus::Maintenance => true,
            LoanStatus::OnLoan | LoanStatus::Reserved => self == LoanStatus::Available,
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

macro_rules! languages {
    ($($variant:ident => ($code:literal, $label:literal)),+ $(,)?) => {
        /// Language a book is written in (two-letter codes)
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum Language {
            $($variant),+
        }

        impl Language {
            pub const ALL: &'static [Language] = &[$(Language::$variant),+];

            pub fn code(self) -> &'static str {
                match self {
                    $(Language::$variant => $code),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(Language::$variant => $label),+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code.to_ascii_lowercase().as_str() {
                    $($code => Some(Language::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

languages! {
    Af => ("af", "Afrikaans"),
    Ar => ("ar", "Arabic"),
    Az => ("az", "Azeri (Latin)"),
    Be => ("be", "Belarusian"),
    Bg => ("bg", "Bulgarian"),
    Ca => ("ca", "Catalan"),
    Cs => ("cs", "Czech"),
    Cy => ("cy", "Welsh"),
    Da => ("da", "Danish"),
    De => ("de", "German"),
    Dv => ("dv", "Divehi"),
    El => ("el", "Greek"),
    En => ("en", "English"),
    Eo => ("eo", "Esperanto"),
    Es => ("es", "Spanish"),
    Et => ("et", "Estonian"),
    Eu => ("eu", "Basque"),
    Fa => ("fa", "Farsi"),
    Fi => ("fi", "Finnish"),
    Fo => ("fo", "Faroese"),
    Fr => ("fr", "French"),
    Gl => ("gl", "Galician"),
    Gu => ("gu", "Gujarati"),
    He => ("he", "Hebrew"),
    Hi => ("hi", "Hindi"),
    Hr => ("hr", "Croatian"),
    Hu => ("hu", "Hungarian"),
    Hy => ("hy", "Armenian"),
    Id => ("id", "Indonesian"),
    Is => ("is", "Icelandic"),
    It => ("it", "Italian"),
    Ja => ("ja", "Japanese"),
    Ka => ("ka", "Georgian"),
    Kk => ("kk", "Kazakh"),
    Kn => ("kn", "Kannada"),
    Ko => ("ko", "Korean"),
    Ky => ("ky", "Kyrgyz"),
    Lt => ("lt", "Lithuanian"),
    Lv => ("lv", "Latvian"),
    Mi => ("mi", "Maori"),
    Mk => ("mk", "FYRO Macedonian"),
    Mn => ("mn", "Mongolian"),
    Mr => ("mr", "Marathi"),
    Ms => ("ms", "Malay"),
    Mt => ("mt", "Maltese"),
    Nb => ("nb", "Norwegian"),
    Nl => ("nl", "Dutch"),
    Ns => ("ns", "Northern Sotho"),
    Pa => ("pa", "Punjabi"),
    Pl => ("pl", "Polish"),
    Ps => ("ps", "Pashto"),
    Pt => ("pt", "Portuguese"),
    Qu => ("qu", "Quechua"),
    Ro => ("ro", "Romanian"),
    Ru => ("ru", "Russian"),
    Sa => ("sa", "Sanskrit"),
    Se => ("se", "Sami (Northern)"),
    Sk => ("sk", "Slovak"),
    Sl => ("sl", "Slovenian"),
    Sq => ("sq", "Albanian"),
    Sv => ("sv", "Swedish"),
    Sw => ("sw", "Swahili"),
    Ta => ("ta", "Tamil"),
    Te => ("te", "Telugu"),
    Th => ("th", "Thai"),
    Tl => ("tl", "Tagalog"),
    Tn => ("tn", "Tswana"),
    Tr => ("tr", "Turkish"),
    Tt => ("tt", "Tatar"),
    Ts => ("ts", "Tsonga"),
    Uk => ("uk", "Ukrainian"),
    Ur => ("ur", "Urdu"),
    Uz => ("uz", "Uzbek (Latin)"),
    Vi => ("vi", "Vietnamese"),
    Xh => ("xh", "Xhosa"),
    Zh => ("zh", "Chinese"),
    Zu => ("zu", "Zulu"),
}

impl Default for Language {
    fn default() -> Self {
        Language::Ko
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
