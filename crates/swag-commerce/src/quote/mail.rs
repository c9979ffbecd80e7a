//! Mail messages handed off to the system mail client.

use serde::Serialize;

/// Sales inbox used when nothing else is configured.
pub const DEFAULT_SALES_EMAIL: &str = "ventas@tuempresa.cl";

/// A composed message, ready to become a `mailto:` link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            cc: None,
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Copy `cc` on the message. A blank address clears it.
    pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
        let cc = cc.into();
        self.cc = (!cc.trim().is_empty()).then_some(cc);
        self
    }

    /// Build the `mailto:` URI.
    ///
    /// Everything is percent-encoded except the `@` of the recipient, so a
    /// stray `?`, `&` or `#` in the address cannot leak into the headers.
    ///
    /// ```
    /// use swag_commerce::quote::MailMessage;
    ///
    /// let mail = MailMessage::new("ventas@tuempresa.cl", "Hola", "Buenos días");
    /// assert_eq!(
    ///     mail.to_mailto(),
    ///     "mailto:ventas@tuempresa.cl?subject=Hola&body=Buenos%20d%C3%ADas"
    /// );
    /// ```
    pub fn to_mailto(&self) -> String {
        let mut uri = format!(
            "mailto:{}?subject={}&body={}",
            urlencoding::encode(self.to.trim()).replace("%40", "@"),
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body),
        );
        if let Some(cc) = &self.cc {
            uri.push_str("&cc=");
            uri.push_str(&urlencoding::encode(cc.trim()));
        }
        uri
    }
}
