use std::sync::mpsc;
use std::thread;

use tiny_http::{Response, Server};

use webmail_client::api::MailBackend;
use webmail_client::api::http::HttpBackend;
use webmail_client::compose::{ComposeForm, SEND_FAILED_ALERT, SubmitOutcome};
use webmail_client::domain::email::{EmailId, Priority};
use webmail_client::domain::mailbox::{ListQuery, MailboxView};

struct Seen {
    method: String,
    url: String,
    auth: Option<String>,
    body: String,
}

/// Serve exactly one request with the given status and body.
fn one_shot(status: u16, reply: &'static str) -> (String, mpsc::Receiver<Seen>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let base = format!("http://{}", server.server_addr());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let mut req = server.recv().unwrap();
        let auth = req
            .headers()
            .iter()
            .find(|h| h.field.equiv("Authorization"))
            .map(|h| h.value.as_str().to_string());
        let mut body = String::new();
        req.as_reader().read_to_string(&mut body).unwrap();
        let seen = Seen {
            method: req.method().as_str().to_string(),
            url: req.url().to_string(),
            auth,
            body,
        };
        req.respond(Response::from_string(reply).with_status_code(status))
            .unwrap();
        tx.send(seen).unwrap();
    });

    (base, rx)
}

#[test]
fn compose_submit_posts_json_with_bearer_key() {
    let (base, rx) = one_shot(200, "ok");
    let backend = HttpBackend::new(&base, "secret-key").unwrap();

    let mut form = ComposeForm::new();
    form.receiver_email = "a@example.com".into();
    form.add_recipient();
    form.receiver_email = "b@example.com".into();
    form.add_recipient();
    form.subject = "S".into();
    form.body = "B".into();
    form.set_priority(Priority::High);

    assert_eq!(form.submit(&backend, "me@example.com", false), SubmitOutcome::Delivered);

    let seen = rx.recv().unwrap();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.url, "/sendEmail");
    assert_eq!(seen.auth.as_deref(), Some("Bearer secret-key"));

    let json: serde_json::Value = serde_json::from_str(&seen.body).unwrap();
    assert_eq!(json["fromAddress"], "me@example.com");
    assert_eq!(json["toAddress"], serde_json::json!(["a@example.com", "b@example.com"]));
    assert_eq!(json["subject"], "S");
    assert_eq!(json["body"], "B");
    assert_eq!(json["priority"], "high");
    assert_eq!(json["isDraft"], false);
}

#[test]
fn server_error_turns_into_alert() {
    let (base, rx) = one_shot(500, "boom");
    let backend = HttpBackend::new(&base, "k").unwrap();

    let mut form = ComposeForm::new();
    form.body = "draft body".into();
    let outcome = form.unmount(&backend, "me@example.com");

    assert_eq!(
        outcome,
        Some(SubmitOutcome::Failed {
            alert: SEND_FAILED_ALERT.to_string()
        })
    );
    let seen = rx.recv().unwrap();
    let json: serde_json::Value = serde_json::from_str(&seen.body).unwrap();
    assert_eq!(json["isDraft"], true);
    assert!(form.body.is_empty());
}

#[test]
fn delete_uses_query_parameters() {
    let (base, rx) = one_shot(200, "");
    let backend = HttpBackend::new(&base, "k").unwrap();

    backend
        .delete_emails("me@example.com", &[EmailId::new("1"), EmailId::new("2")])
        .unwrap();

    let seen = rx.recv().unwrap();
    assert_eq!(seen.method, "DELETE");
    assert_eq!(seen.url, "/deleteEmail?Address=me%40example.com&id=1%2C2");
}

#[test]
fn add_to_folder_sends_id_twice() {
    let (base, rx) = one_shot(200, "");
    let backend = HttpBackend::new(&base, "k").unwrap();

    backend
        .add_to_folder("me@example.com", &[EmailId::new("5")], "work")
        .unwrap();

    let seen = rx.recv().unwrap();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.url, "/addToFolder?Address=me%40example.com&id=5&id=work");
}

#[test]
fn fetch_parses_summaries() {
    let (base, rx) = one_shot(
        200,
        r#"[{"id": 1, "fromAddress": "x@y.z", "subject": "Hi", "body": "hello",
             "toAddress": "me@example.com", "time": "10:00", "attachments": [],
             "type": "inbox", "color": "primary"}]"#,
    );
    let backend = HttpBackend::new(&base, "k").unwrap();

    let items = backend
        .fetch_emails("me@example.com", &MailboxView::Inbox, &ListQuery::default())
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, EmailId::new("1"));
    assert_eq!(items[0].color.as_deref(), Some("primary"));

    let seen = rx.recv().unwrap();
    assert_eq!(seen.method, "GET");
    assert!(seen.url.starts_with("/getEmails?Address=me%40example.com&type=inbox"));
}
