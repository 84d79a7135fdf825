//! User-facing Arabic texts. Log output stays in English through the
//! `Display` impls of the error types.

use walink_core::error::DomainError;
use walink_core::link::WhatsAppLink;
use walink_core::phone::InvalidNumber;

pub const SHARE_WITHOUT_LINK: &str = "يرجى إنشاء الرابط أولاً.";
pub const INPUT_CLEARED: &str = "تم مسح الحقل 🧹";
pub const HISTORY_CLEARED: &str = "تم مسح السجل 🧹";

pub fn generated(link: &WhatsAppLink) -> String {
    format!("تم إنشاء الرابط بنجاح! 🎉 {link}")
}

pub fn for_error(err: &DomainError) -> String {
    match err {
        DomainError::EmptyInput => "يرجى إدخال رقم الهاتف.".to_string(),
        DomainError::InvalidCharacters => "يرجى إدخال أرقام فقط.".to_string(),
        DomainError::InvalidSaudiNumber(reason) => {
            let base = "يرجى إدخال رقم جوال سعودي صحيح.";
            match reason {
                InvalidNumber::TooShort => format!("{base} الرقم قصير جدًا."),
                InvalidNumber::TooLong => format!("{base} الرقم طويل جدًا."),
                InvalidNumber::WrongPrefix => format!("{base} يجب أن يبدأ رقم الجوال بـ 05."),
                InvalidNumber::NonDigit => base.to_string(),
            }
        }
        DomainError::DuplicateLink { position } => {
            format!("تم إنشاء رابط لهذا الرقم مسبقًا وهو موجود في السجل رقم {position}.")
        }
        DomainError::InvalidLink(_) => "الرابط غير صالح.".to_string(),
    }
}
