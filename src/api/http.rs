use anyhow::{Result, anyhow};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use url::Url;

use crate::api::{MailBackend, join_ids};
use crate::domain::email::{Email, EmailId, EmailSummary};
use crate::domain::mailbox::{ListQuery, MailboxView};

/// `MailBackend` over the REST API.
pub struct HttpBackend {
    base: Url,
    api_key: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| anyhow!("Invalid backend_url '{base_url}': {e}"))?;
        // Url::join drops the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            api_key: api_key.into(),
            client: Client::new(),
        })
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.api_key)
    }

    pub fn send_email_url(&self) -> Result<Url> {
        Ok(self.base.join("sendEmail")?)
    }

    pub fn delete_url(&self, owner: &str, ids: &[EmailId]) -> Result<Url> {
        let mut url = self.base.join("deleteEmail")?;
        url.query_pairs_mut()
            .append_pair("Address", owner)
            .append_pair("id", &join_ids(ids));
        Ok(url)
    }

    /// The folder travels under the same `id` key as the email list.
    pub fn add_to_folder_url(&self, owner: &str, ids: &[EmailId], folder: &str) -> Result<Url> {
        let mut url = self.base.join("addToFolder")?;
        url.query_pairs_mut()
            .append_pair("Address", owner)
            .append_pair("id", &join_ids(ids))
            .append_pair("id", folder);
        Ok(url)
    }

    pub fn fetch_url(&self, owner: &str, view: &MailboxView, query: &ListQuery) -> Result<Url> {
        let mut url = self.base.join("getEmails")?;
        url.query_pairs_mut()
            .append_pair("Address", owner)
            .append_pair("type", view.type_param())
            .append_pair("sort", query.sort.as_str())
            .append_pair("filter", query.filter.as_str())
            .append_pair("search", &query.substring);
        Ok(url)
    }
}

impl MailBackend for HttpBackend {
    fn send_email(&self, email: &Email) -> Result<()> {
        let resp = self
            .authorized(self.client.post(self.send_email_url()?))
            .json(email)
            .send()?
            .error_for_status()?;

        if resp.status() == StatusCode::OK {
            log::info!("Email sent successfully!");
        } else {
            log::error!("Error sending email: status {}", resp.status());
        }
        Ok(())
    }

    fn delete_emails(&self, owner: &str, ids: &[EmailId]) -> Result<()> {
        self.authorized(self.client.delete(self.delete_url(owner, ids)?))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn add_to_folder(&self, owner: &str, ids: &[EmailId], folder: &str) -> Result<()> {
        self.authorized(self.client.post(self.add_to_folder_url(owner, ids, folder)?))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn fetch_emails(
        &self,
        owner: &str,
        view: &MailboxView,
        query: &ListQuery,
    ) -> Result<Vec<EmailSummary>> {
        let items = self
            .authorized(self.client.get(self.fetch_url(owner, view, query)?))
            .send()?
            .error_for_status()?
            .json::<Vec<EmailSummary>>()?;
        Ok(items)
    }
}
