//! Contentful provider using the Content Delivery API.
//!
//! Courses are `course` entries whose `lessons` field links to `lesson`
//! entries, which in turn link to module entries (`lessonCodeSnippets`,
//! `lessonImage`, `lessonCopy`). One request with `include=10` returns the
//! course in `items` and every linked entry/asset in `includes`; links are
//! resolved locally.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::content::{
    CodeSnippet, ContentError, ContentProvider, CopyModule, Course, CourseSummary, ImageModule,
    Lesson, LessonModule,
};

pub const DEFAULT_BASE_URL: &str = "https://cdn.contentful.com";
pub const DEFAULT_ENVIRONMENT: &str = "master";
pub const DEFAULT_LOCALE: &str = "en-US";

/// Link depth requested from the API. Course → lesson → module → asset needs 3.
const INCLUDE_DEPTH: &str = "10";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Delivery API Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct EntriesResponse {
    #[serde(default)]
    items: Vec<Entry>,
    #[serde(default)]
    includes: Includes,
}

#[derive(Deserialize, Debug, Default)]
struct Includes {
    #[serde(rename = "Entry", default)]
    entries: Vec<Entry>,
    #[serde(rename = "Asset", default)]
    assets: Vec<Asset>,
}

#[derive(Deserialize, Debug)]
struct Entry {
    sys: Sys,
    #[serde(default)]
    fields: serde_json::Value,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Sys {
    id: String,
    #[serde(default)]
    content_type: Option<Link>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// `{"sys": {"type": "Link", "linkType": "Entry", "id": "..."}}`
#[derive(Deserialize, Debug)]
struct Link {
    sys: LinkSys,
}

#[derive(Deserialize, Debug)]
struct LinkSys {
    id: String,
}

#[derive(Deserialize, Debug)]
struct Asset {
    sys: Sys,
    #[serde(default)]
    fields: AssetFields,
}

#[derive(Deserialize, Debug, Default)]
struct AssetFields {
    #[serde(default)]
    file: Option<AssetFile>,
}

#[derive(Deserialize, Debug)]
struct AssetFile {
    url: String,
}

// Field shapes per content type

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseFields {
    title: String,
    slug: String,
    #[serde(default)]
    short_description: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    duration: u32,
    #[serde(default)]
    skill_level: String,
    #[serde(default)]
    lessons: Vec<Link>,
}

#[derive(Deserialize)]
struct LessonFields {
    title: String,
    slug: String,
    #[serde(default)]
    modules: Vec<Link>,
}

#[derive(Deserialize)]
struct ImageFields {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    image: Option<Link>,
    #[serde(default)]
    caption: String,
}

// ============================================================================
// Link Resolution
// ============================================================================

/// Indexes every entry and asset of a response by id.
struct Resolver<'a> {
    entries: HashMap<&'a str, &'a Entry>,
    assets: HashMap<&'a str, &'a Asset>,
}

impl<'a> Resolver<'a> {
    fn new(response: &'a EntriesResponse) -> Self {
        let entries = response
            .items
            .iter()
            .chain(response.includes.entries.iter())
            .map(|e| (e.sys.id.as_str(), e))
            .collect();
        let assets = response
            .includes
            .assets
            .iter()
            .map(|a| (a.sys.id.as_str(), a))
            .collect();
        Self { entries, assets }
    }

    fn entry(&self, link: &Link) -> Option<&'a Entry> {
        let entry = self.entries.get(link.sys.id.as_str()).copied();
        if entry.is_none() {
            // Unpublished or beyond include depth
            warn!("Unresolved entry link: {}", link.sys.id);
        }
        entry
    }

    fn asset_url(&self, link: &Link) -> Option<String> {
        let asset = self.assets.get(link.sys.id.as_str())?;
        asset
            .fields
            .file
            .as_ref()
            .map(|file| normalize_asset_url(&file.url))
    }
}

/// Asset URLs come protocol-relative (`//images.ctfassets.net/...`).
fn normalize_asset_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

fn content_type(entry: &Entry) -> &str {
    entry
        .sys
        .content_type
        .as_ref()
        .map(|link| link.sys.id.as_str())
        .unwrap_or("")
}

fn parse_fields<T: DeserializeOwned>(entry: &Entry) -> Result<T, ContentError> {
    serde_json::from_value(entry.fields.clone())
        .map_err(|e| ContentError::Parse(format!("entry {}: {e}", entry.sys.id)))
}

fn build_course(entry: &Entry, resolver: &Resolver<'_>) -> Result<Course, ContentError> {
    let fields: CourseFields = parse_fields(entry)?;
    let lessons = fields
        .lessons
        .iter()
        .filter_map(|link| resolver.entry(link))
        .map(|lesson| build_lesson(lesson, resolver))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Course {
        slug: fields.slug,
        title: fields.title,
        short_description: fields.short_description,
        description: fields.description,
        duration: fields.duration,
        skill_level: fields.skill_level,
        lessons,
        updated_at: entry.sys.updated_at,
    })
}

fn build_lesson(entry: &Entry, resolver: &Resolver<'_>) -> Result<Lesson, ContentError> {
    let fields: LessonFields = parse_fields(entry)?;
    let mut modules = Vec::with_capacity(fields.modules.len());
    for link in &fields.modules {
        if let Some(module_entry) = resolver.entry(link)
            && let Some(module) = build_module(module_entry, resolver)?
        {
            modules.push(module);
        }
    }
    Ok(Lesson {
        slug: fields.slug,
        title: fields.title,
        modules,
    })
}

fn build_module(
    entry: &Entry,
    resolver: &Resolver<'_>,
) -> Result<Option<LessonModule>, ContentError> {
    let module = match content_type(entry) {
        "lessonCodeSnippets" => LessonModule::CodeSnippet(parse_fields::<CodeSnippet>(entry)?),
        "lessonCopy" => LessonModule::Copy(parse_fields::<CopyModule>(entry)?),
        "lessonImage" => {
            let fields: ImageFields = parse_fields(entry)?;
            let url = fields
                .image
                .as_ref()
                .and_then(|link| resolver.asset_url(link))
                .unwrap_or_default();
            LessonModule::Image(ImageModule {
                title: fields.title,
                url,
                caption: fields.caption,
            })
        }
        other => {
            warn!("Skipping module {} of unknown type {:?}", entry.sys.id, other);
            return Ok(None);
        }
    };
    Ok(Some(module))
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Contentful Content Delivery API provider.
pub struct ContentfulProvider {
    space_id: String,
    access_token: String,
    environment: String,
    base_url: String,
    locale: String,
    client: reqwest::Client,
}

impl ContentfulProvider {
    /// Creates a new Contentful provider.
    ///
    /// # Arguments
    /// * `space_id` - Contentful space to read from
    /// * `access_token` - Delivery API access token
    /// * `environment` - Optional environment (defaults to `master`)
    /// * `base_url` - Optional custom base URL (defaults to the public CDN)
    pub fn new(
        space_id: String,
        access_token: String,
        environment: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self {
            space_id,
            access_token,
            environment: environment.unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            locale: DEFAULT_LOCALE.to_string(),
            client,
        }
    }

    pub fn with_locale(mut self, locale: String) -> Self {
        self.locale = locale;
        self
    }

    fn entries_url(&self) -> String {
        format!(
            "{}/spaces/{}/environments/{}/entries",
            self.base_url, self.space_id, self.environment
        )
    }

    /// Queries the entries endpoint for courses matching `filter`.
    async fn fetch_entries(
        &self,
        filter: &[(&str, &str)],
    ) -> Result<EntriesResponse, ContentError> {
        let url = self.entries_url();
        debug!("Contentful request: {} {:?}", url, filter);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("content_type", "course"),
                ("include", INCLUDE_DEPTH),
                ("locale", self.locale.as_str()),
            ])
            .query(filter)
            .send()
            .await
            .map_err(|e| ContentError::Network(e.to_string()))?;

        debug!("Contentful response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Contentful API error: {} - {}", status, err_body);
            return Err(ContentError::Api {
                status,
                message: err_body,
            });
        }

        response
            .json::<EntriesResponse>()
            .await
            .map_err(|e| ContentError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ContentProvider for ContentfulProvider {
    fn name(&self) -> &str {
        "contentful"
    }

    async fn fetch_course_by_slug(&self, slug: &str) -> Result<Course, ContentError> {
        let response = self.fetch_entries(&[("fields.slug", slug)]).await?;
        let resolver = Resolver::new(&response);
        let entry = response
            .items
            .first()
            .ok_or_else(|| ContentError::NotFound(format!("Course \"{slug}\"")))?;
        let course = build_course(entry, &resolver)?;
        info!(
            "Fetched course {} ({} lessons)",
            course.slug,
            course.lessons.len()
        );
        Ok(course)
    }

    async fn fetch_courses(&self) -> Result<Vec<CourseSummary>, ContentError> {
        let response = self.fetch_entries(&[("order", "sys.createdAt")]).await?;
        let resolver = Resolver::new(&response);
        let courses = response
            .items
            .iter()
            .map(|entry| build_course(entry, &resolver).map(|c| c.summary()))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Fetched {} courses", courses.len());
        Ok(courses)
    }
}
