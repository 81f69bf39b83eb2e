use gloo_net::http::Request;
use log::info;
use serde::Serialize;

use crate::config;
use crate::error::ContactError;

use super::form::ContactFields;

#[derive(Serialize)]
struct TemplateParams<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

impl<'a> SendRequest<'a> {
    fn new(fields: &'a ContactFields) -> Self {
        Self {
            service_id: config::EMAILJS_SERVICE_ID,
            template_id: config::EMAILJS_TEMPLATE_ID,
            user_id: config::EMAILJS_PUBLIC_KEY,
            template_params: TemplateParams {
                name: &fields.name,
                email: &fields.email,
                message: &fields.message,
            },
        }
    }
}

/// Delivers the contact form through EmailJS.
pub async fn send_form(fields: &ContactFields) -> Result<(), ContactError> {
    let response = Request::post(config::EMAILJS_SEND_URL)
        .json(&SendRequest::new(fields))
        .map_err(|e| ContactError::Request(e.to_string()))?
        .send()
        .await?;

    if response.ok() {
        info!("Contact message delivered");
        Ok(())
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ContactError::Rejected { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_carries_account_ids_and_fields() {
        let fields = ContactFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hi there".into(),
        };
        let body = serde_json::to_value(SendRequest::new(&fields)).unwrap();
        assert_eq!(
            body,
            json!({
                "service_id": "service_4idhiqq",
                "template_id": "template_55e83i4",
                "user_id": "Gek_oA23TXvZIGTPj",
                "template_params": {
                    "name": "Ada",
                    "email": "ada@example.com",
                    "message": "Hi there",
                },
            })
        );
    }
}
