//! Prompt construction for the text and image generation endpoints.
//!
//! Everything here is a pure string builder: same inputs, same output.
//! No validation is applied to titles or topics; empty strings are
//! accepted and substituted as-is.

/// Topic that selects the fixed editorial post instead of a templated one.
pub const INIT_TOPIC: &str = "init";

/// Title used for the fixed editorial post.
pub const INIT_TITLE: &str = "Rayze Daily Peek - Technology Strategy, Engineering and AI";

const INIT_TAGS: &str = "python, data engineering, cloud migration, microservices, \
digitization, ML, AI, Large Language Models";

/// Derive the post title from the topic.
pub fn title_for_topic(topic: &str) -> String {
    if topic == INIT_TOPIC {
        INIT_TITLE.to_string()
    } else {
        format!("Practical Engineering with {topic}")
    }
}

/// Tag line shown on the card snippet for a given topic.
pub fn tags_for_topic(topic: &str) -> String {
    if topic == INIT_TOPIC {
        INIT_TAGS.to_string()
    } else {
        topic.to_string()
    }
}

/// Build the instruction block sent to the text completion endpoint.
///
/// The `"init"` topic produces the fixed background block for the
/// editorial post; any other topic is substituted into the background,
/// tags and summary lines.
pub fn build_text_prompt(title: &str, topic: &str) -> String {
    if topic == INIT_TOPIC {
        format!(
            "Background:\n\
             Rayze is a growth stage technology consulting company. We are a team of \
             software engineers passionate in making our clients reach their ambitions.\n\
             \n\
             Blog\n\
             Title: {title}\n\
             tags: {INIT_TAGS}\n\
             Summary: This Rayze blog will focus on latest trends on {INIT_TAGS}. \
             It will suggest practical solutions to common problems that clients \
             encounter with these technologies. It will focus on useful APIs, libraries, \
             tools and solutions that are opensourced, especially those that help with \
             cost reduction. This is a tldr punchy blog post with helpful links, \
             so each blog will be 200 to 500 words in length.\n\
             Full Text:"
        )
    } else {
        format!(
            "Background:\n\
             A useful technical blog on the latest APIs, libraries, tools, trends in {topic}\n\
             \n\
             Blog\n\
             Title: {title}\n\
             tags: {topic}\n\
             Summary: Write a technical engineering blog on {topic}. It will focus on \
             latest trends, and suggest practical solutions to common problems that \
             clients encounter with this technology. It will focus on useful APIs, \
             libraries, tools and solutions that are opensourced, especially those that \
             help with cost reduction. This is a tldr punchy blog post with helpful \
             links, so each blog will be 200 to 500 words in length.\n\
             Full Text:"
        )
    }
}

/// Build the prompt sent to the image generation endpoint.
pub fn build_image_prompt(title: &str) -> String {
    format!("Abstract anime image of {title}")
}
