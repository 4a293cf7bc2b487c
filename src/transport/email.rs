use serde_json::{Map, Value};

use crate::domain::{EmailSent, SendEmail};

use super::{ApiBase, Endpoint, JsonBody, Method};

impl Endpoint for SendEmail {
    type Data = EmailSent;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Send;

    fn path(&self) -> Vec<String> {
        vec!["email".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        let to = match self.to.as_slice() {
            [single] => Value::from(single.as_str()),
            many => Value::from(many.to_vec()),
        };
        let headers = (!self.headers.is_empty()).then(|| {
            self.headers
                .iter()
                .map(|(name, value)| (name.clone(), Value::from(value.as_str())))
                .collect::<Map<_, _>>()
        });

        JsonBody::new()
            .field("to", to)
            .field("from", self.from.as_str())
            .field("subject", self.subject.as_str())
            .optional("html", self.html.as_deref())
            .optional("text", self.text.as_deref())
            .optional("reply_to", self.reply_to.as_deref())
            .list("cc", &self.cc)
            .list("bcc", &self.bcc)
            .optional("headers", headers)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn single_recipient_is_sent_as_a_string() {
        let request = SendEmail::new("dev@example.com", "Acme <hi@acme.dev>", "Welcome").text("hi");

        assert_eq!(
            request.body(),
            Some(json!({
                "to": "dev@example.com",
                "from": "Acme <hi@acme.dev>",
                "subject": "Welcome",
                "text": "hi"
            }))
        );
    }

    #[test]
    fn multiple_recipients_and_headers_are_sent_as_collections() {
        let mut request =
            SendEmail::new("a@example.com", "Acme", "Invoice").html("<p>due</p>");
        request.to.push("b@example.com".to_owned());
        request.bcc.push("audit@acme.dev".to_owned());
        request
            .headers
            .insert("X-Campaign".to_owned(), "q3".to_owned());

        let body = request.body().unwrap();
        assert_eq!(body["to"], json!(["a@example.com", "b@example.com"]));
        assert_eq!(body["bcc"], json!(["audit@acme.dev"]));
        assert_eq!(body["headers"], json!({"X-Campaign": "q3"}));
        assert!(body.get("cc").is_none());
    }
}
