//! The publishing pipeline: generate, persist the page, link it into
//! the index, commit and push.
//!
//! Execution is fully sequential. Every external call is validated
//! before the first filesystem mutation, and the index duplicate check
//! runs before anything is written, so a conflicting run fails with the
//! working tree untouched. There is no rollback for later failures: a
//! page written before e.g. a failed push stays on disk.
//!
//! Single-writer contract: two concurrent runs against the same site
//! directory are not supported and must be excluded by the caller.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::cover::{self, CoverError, CoverSettings};
use crate::generate::{GenerateError, ImageGenerator, TextGenerator};
use crate::index::{IndexError, IndexPage};
use crate::page::{self, PageError};
use crate::prompt;
use crate::publish::{PublishError, Publisher};
use crate::store::{ContentStore, StoreError};

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Root of the site repository working tree.
    pub site_root: PathBuf,
    pub content_dir_name: String,
    pub index_file_name: String,
    /// Landing page holding the card placeholder token.
    pub template_file_name: String,
    pub placeholder_token: String,
    /// Fixed per-run cover file name; overwritten each run.
    pub cover_file_name: String,
}

impl SiteConfig {
    pub fn new(site_root: PathBuf) -> Self {
        Self {
            site_root,
            content_dir_name: "content".to_string(),
            index_file_name: "index.html".to_string(),
            template_file_name: "bootsBlog_template.html".to_string(),
            placeholder_token: "storyCode".to_string(),
            cover_file_name: "BLOGPOST1.png".to_string(),
        }
    }

    pub fn content_dir(&self) -> PathBuf {
        self.site_root.join(&self.content_dir_name)
    }

    pub fn index_path(&self) -> PathBuf {
        self.site_root.join(&self.index_file_name)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Cover(#[from] CoverError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

#[derive(Debug, Clone)]
pub struct PublishedPost {
    pub id: u32,
    pub title: String,
    pub page_path: PathBuf,
}

pub struct Pipeline {
    config: SiteConfig,
    cover_settings: CoverSettings,
    text: Arc<dyn TextGenerator>,
    image: Arc<dyn ImageGenerator>,
    publisher: Arc<dyn Publisher>,
}

impl Pipeline {
    pub fn new(
        config: SiteConfig,
        cover_settings: CoverSettings,
        text: Arc<dyn TextGenerator>,
        image: Arc<dyn ImageGenerator>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            config,
            cover_settings,
            text,
            image,
            publisher,
        }
    }

    /// Run the whole pipeline for one topic and return the published
    /// post on success.
    pub async fn run(&self, topic: &str) -> Result<PublishedPost, PipelineError> {
        let title = prompt::title_for_topic(topic);
        let tags = prompt::tags_for_topic(topic);

        log::info!("generating post for topic {topic:?} (title {title:?})");
        let body = self
            .text
            .generate_text(&prompt::build_text_prompt(&title, topic))
            .await?;
        let image_url = self
            .image
            .generate_image(&prompt::build_image_prompt(&title))
            .await?;

        log::info!("downloading cover image from {image_url}");
        let cover_bytes = cover::fetch_cover(&image_url, &self.cover_settings).await?;

        // Everything external succeeded; validate the index before the
        // first write.
        let store = ContentStore::new(self.config.content_dir());
        store.ensure_content_dir()?;
        let index_path = self.config.index_path();
        let mut index = IndexPage::load(&index_path)?;

        let id = store.next_page_id()?;
        let href = format!(
            "{}/{}",
            self.config.content_dir_name,
            ContentStore::page_file_name(id)
        );
        if index.contains_link(&href) {
            return Err(IndexError::DuplicateLink(href).into());
        }

        let banner = cover::resize_banner(&cover_bytes, self.cover_settings.banner_size)?;

        let page_html = page::render_post(&title, &self.config.cover_file_name, &body);
        let page_path = store.write_page(id, &page_html)?;
        log::info!("wrote page {}", page_path.display());

        store.stage_cover(&self.config.cover_file_name, &banner)?;

        let card = page::render_card(&self.config.cover_file_name, &title, &tags, &href);
        store.append_card(
            &self.config.template_file_name,
            &self.config.placeholder_token,
            &card,
        )?;

        index.append_link(&href, &id.to_string())?;
        index.save(&index_path)?;
        log::info!("linked {href} into {}", index_path.display());

        self.publisher
            .publish(&format!("Publish post {id}: {title}"))?;

        Ok(PublishedPost {
            id,
            title,
            page_path,
        })
    }
}
