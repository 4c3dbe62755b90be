//! Donation and share details

pub const PIX_KEY: &str = "basecalistenia@gmail.com";
pub const SUGGESTED_AMOUNT: &str = "R$ 19,90";
pub const CONTACT_PHONE: &str = "5566981182564";

pub const SHARE_URL: &str = "https://bsde-caslistenia.vercel.app/";
pub const SHARE_TITLE: &str = "BaseCalistenia - Treinos em Casa";
pub const SHARE_TEXT: &str = "Estou treinando com o BaseCalistenia! 4 semanas de treinos gratuitos.";

// Pre-encoded message bodies
const CONTACT_MESSAGE: &str = "Ol%C3%A1%2C%20gostaria%20de%20saber%20mais%20sobre%20o%20BaseCalistenia";
const RECEIPT_MESSAGE: &str =
    "Ol%C3%A1%2C%20segue%20meu%20comprovante%20de%20doa%C3%A7%C3%A3o%20para%20o%20BaseCalistenia%21";

fn whatsapp_link(encoded_text: &str) -> String {
    format!("https://wa.me/{}?text={}", CONTACT_PHONE, encoded_text)
}

/// General questions about the project
pub fn contact_link() -> String {
    whatsapp_link(CONTACT_MESSAGE)
}

/// Send the donation receipt to claim the bonus
pub fn receipt_link() -> String {
    whatsapp_link(RECEIPT_MESSAGE)
}

/// Text for sharing the app outside a native share sheet
pub fn share_message() -> String {
    format!("{}\n{}\n{}", SHARE_TITLE, SHARE_TEXT, SHARE_URL)
}
