//! Blogsmith engine: generate, persist, link and publish one blog post.
mod cover;
mod generate;
mod index;
mod page;
mod persist;
mod pipeline;
mod prompt;
mod publish;
mod store;

pub use cover::{fetch_cover, resize_banner, CoverError, CoverSettings};
pub use generate::{
    GenerateError, ImageGenerator, OpenAiClient, OpenAiConfig, TextGenerator,
};
pub use index::{IndexError, IndexPage};
pub use page::{escape_html, render_card, render_post, substitute_placeholder, PageError};
pub use pipeline::{Pipeline, PipelineError, PublishedPost, SiteConfig};
pub use prompt::{
    build_image_prompt, build_text_prompt, tags_for_topic, title_for_topic, INIT_TITLE, INIT_TOPIC,
};
pub use publish::{GitCliPublisher, PublishError, Publisher};
pub use store::{ContentStore, StoreError};
