// src/locale.rs

use crate::record::Subject;
use serde::{Deserialize, Serialize};

/// User-facing language. Arabic is the sheet's native language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ar" | "arabic" => Some(Locale::Ar),
            "en" | "english" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Locale::Ar)
    }

    pub fn messages(&self) -> &'static Messages {
        match self {
            Locale::Ar => &AR,
            Locale::En => &EN,
        }
    }
}

/// Defaults for the name and institution cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeholders {
    pub name: &'static str,
    pub institution: &'static str,
}

impl Default for Placeholders {
    fn default() -> Self {
        AR.placeholders
    }
}

/// Every string the presenters show.
#[derive(Debug)]
pub struct Messages {
    pub placeholders: Placeholders,
    pub enter_seat: &'static str,
    /// `{}` is replaced with the searched seat key.
    pub not_found: &'static str,
    /// `{}` is replaced with the failure reason.
    pub technical_error: &'static str,
    pub connection_failed: &'static str,
    pub empty_payload: &'static str,
    pub loading: &'static str,
    pub name: &'static str,
    pub seat: &'static str,
    pub institution: &'static str,
    pub subject: &'static str,
    pub grade: &'static str,
    pub total: &'static str,
    pub search_again: &'static str,
    subjects: [&'static str; 10],
}

impl Messages {
    pub fn subject(&self, subject: Subject) -> &'static str {
        let idx = Subject::ALL
            .iter()
            .position(|s| *s == subject)
            .unwrap_or_default();
        self.subjects[idx]
    }

    pub fn not_found_for(&self, key: &str) -> String {
        self.not_found.replacen("{}", key, 1)
    }

    pub fn technical_error_for(&self, reason: &str) -> String {
        self.technical_error.replacen("{}", reason, 1)
    }
}

static AR: Messages = Messages {
    placeholders: Placeholders {
        name: "لا يوجد اسم",
        institution: "لا توجد مدرسة",
    },
    enter_seat: "الرجاء إدخال رقم الجلوس.",
    not_found: "رقم الجلوس \"{}\" غير موجود أو غير صحيح.",
    technical_error: "حدث خطأ فني: {}",
    connection_failed: "فشل الاتصال بالخادم",
    empty_payload: "تم استلام بيانات فارغة من المصدر.",
    loading: "جارٍ البحث...",
    name: "الاسم",
    seat: "رقم الجلوس",
    institution: "المدرسة",
    subject: "المادة",
    grade: "الدرجة",
    total: "المجموع",
    search_again: "البحث عن رقم جلوس آخر",
    subjects: [
        "اللغة العربية",
        "اللغة الإنجليزية",
        "الدراسات الاجتماعية",
        "الجبر",
        "الهندسة",
        "العلوم",
        "المجموع",
        "الحاسب الآلي",
        "التربية الدينية",
        "التربية الفنية",
    ],
};

static EN: Messages = Messages {
    placeholders: Placeholders {
        name: "No name",
        institution: "No school",
    },
    enter_seat: "Please enter a seat number.",
    not_found: "Seat number \"{}\" was not found or is invalid.",
    technical_error: "A technical error occurred: {}",
    connection_failed: "Failed to connect to the server",
    empty_payload: "The source returned an empty payload.",
    loading: "Searching...",
    name: "Name",
    seat: "Seat number",
    institution: "School",
    subject: "Subject",
    grade: "Grade",
    total: "Total",
    search_again: "Search for another seat number",
    subjects: [
        "Arabic",
        "English",
        "Social studies",
        "Algebra",
        "Geometry",
        "Science",
        "Subtotal",
        "Computer",
        "Religious education",
        "Art education",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates() {
        let m = Locale::En.messages();
        assert_eq!(
            m.not_found_for("102"),
            "Seat number \"102\" was not found or is invalid."
        );
        assert_eq!(
            m.technical_error_for("boom"),
            "A technical error occurred: boom"
        );
        assert_eq!(m.subject(Subject::Art), "Art education");
        assert_eq!(Locale::Ar.messages().subject(Subject::Algebra), "الجبر");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Locale::from_str(" EN "), Some(Locale::En));
        assert_eq!(Locale::from_str("arabic"), Some(Locale::Ar));
        assert_eq!(Locale::from_str("fr"), None);
        assert_eq!(Placeholders::default().name, "لا يوجد اسم");
    }
}
