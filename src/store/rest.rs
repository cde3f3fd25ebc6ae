use std::time::Duration;

use anyhow::Context as _;
use serde::Deserialize;
use url::Url;

use crate::config::WordPressConfig;
use crate::formats::{Course, Lesson};
use crate::store::ContentStore;

const PER_PAGE: u32 = 100;

/// LearnDash v2 REST API, authenticated with an application password.
#[derive(Debug)]
pub struct RestStore {
    client: reqwest::blocking::Client,
    api_base: Url,
    user: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct RestPost {
    id: u64,
    title: RestTitle,
}

#[derive(Debug, Deserialize)]
struct RestTitle {
    #[serde(default)]
    raw: Option<String>,
    #[serde(default)]
    rendered: String,
}

impl RestPost {
    /// Raw (`context=edit`) title when the API returns it.
    fn into_parts(self) -> (u64, String) {
        (self.id, self.title.raw.unwrap_or(self.title.rendered))
    }
}

impl RestStore {
    pub fn new(config: &WordPressConfig) -> anyhow::Result<Self> {
        let site_url = config
            .site_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("WP_SITE_URL is not set"))?;
        let user = config
            .api_user
            .clone()
            .ok_or_else(|| anyhow::anyhow!("WP_API_USER is not set"))?;
        let password = config
            .api_password
            .clone()
            .ok_or_else(|| anyhow::anyhow!("WP_API_PASSWORD is not set"))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("build http client")?;

        Ok(Self {
            client,
            api_base: api_base(site_url)?,
            user,
            password,
        })
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        self.api_base
            .join(path)
            .with_context(|| format!("build endpoint url: {path}"))
    }

    fn list_posts(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<Vec<RestPost>> {
        let endpoint = self.endpoint(path)?;
        let mut posts = Vec::new();
        let mut page = 1u32;

        loop {
            let response = self
                .client
                .get(endpoint.clone())
                .basic_auth(&self.user, Some(&self.password))
                .query(query)
                .query(&[
                    ("context", "edit".to_owned()),
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .with_context(|| format!("GET {endpoint}"))?;

            let status = response.status();
            let total_pages = response
                .headers()
                .get("X-WP-TotalPages")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(1);
            let raw = response.text().context("read REST response body")?;
            if !status.is_success() {
                let message = parse_error_message(&raw).unwrap_or(raw);
                anyhow::bail!("WordPress REST error ({status}): {message}");
            }

            let batch: Vec<RestPost> = serde_json::from_str(&raw)
                .with_context(|| format!("parse REST listing: {endpoint}"))?;
            posts.extend(batch);

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(posts)
    }
}

fn api_base(site_url: &str) -> anyhow::Result<Url> {
    let mut base = Url::parse(site_url).with_context(|| format!("parse site url: {site_url}"))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("wp-json/ldlms/v2/")
        .context("build LearnDash API base url")
}

fn parse_error_message(raw_json: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw_json).ok()?;
    let message = value.get("message")?.as_str()?.to_owned();
    Some(message)
}

impl ContentStore for RestStore {
    fn list_courses(&self) -> anyhow::Result<Vec<Course>> {
        let posts = self
            .list_posts("sfwd-courses", &[("status", "publish".to_owned())])
            .context("list courses via REST")?;
        Ok(posts
            .into_iter()
            .map(|post| {
                let (id, title) = post.into_parts();
                Course { id, title }
            })
            .collect())
    }

    fn list_lessons(&self, course_id: u64) -> anyhow::Result<Vec<Lesson>> {
        let posts = self
            .list_posts(
                "sfwd-lessons",
                &[
                    ("course", course_id.to_string()),
                    ("status", "publish,draft".to_owned()),
                    ("orderby", "menu_order".to_owned()),
                    ("order", "asc".to_owned()),
                ],
            )
            .with_context(|| format!("list lessons of course {course_id} via REST"))?;
        Ok(posts
            .into_iter()
            .map(|post| {
                let (id, title) = post.into_parts();
                Lesson { id, title }
            })
            .collect())
    }

    fn rename(&self, lesson_id: u64, new_title: &str) -> anyhow::Result<()> {
        let endpoint = self.endpoint(&format!("sfwd-lessons/{lesson_id}"))?;
        let response = self
            .client
            .post(endpoint.clone())
            .basic_auth(&self.user, Some(&self.password))
            .json(&serde_json::json!({ "title": new_title }))
            .send()
            .with_context(|| format!("POST {endpoint}"))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().unwrap_or_default();
            let message = parse_error_message(&raw).unwrap_or(raw);
            anyhow::bail!("WordPress REST error ({status}): {message}");
        }
        Ok(())
    }
}
