//! Publishing platforms and the writing brief for each.

use std::fmt;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    InstagramReels,
    Youtube,
    YoutubeShorts,
    Twitter,
    Linkedin,
    Tiktok,
    Medium,
    Wordpress,
    Substack,
    Website,
    LandingPage,
    #[serde(rename = "email_marketing")]
    Email,
    PodcastScript,
    VideoScript,
}

impl Platform {
    pub const ALL: [Platform; 15] = [
        Platform::Instagram,
        Platform::InstagramReels,
        Platform::Youtube,
        Platform::YoutubeShorts,
        Platform::Twitter,
        Platform::Linkedin,
        Platform::Tiktok,
        Platform::Medium,
        Platform::Wordpress,
        Platform::Substack,
        Platform::Website,
        Platform::LandingPage,
        Platform::Email,
        Platform::PodcastScript,
        Platform::VideoScript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::InstagramReels => "instagram_reels",
            Platform::Youtube => "youtube",
            Platform::YoutubeShorts => "youtube_shorts",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Tiktok => "tiktok",
            Platform::Medium => "medium",
            Platform::Wordpress => "wordpress",
            Platform::Substack => "substack",
            Platform::Website => "website",
            Platform::LandingPage => "landing_page",
            Platform::Email => "email_marketing",
            Platform::PodcastScript => "podcast_script",
            Platform::VideoScript => "video_script",
        }
    }

    /// Writing brief for this platform, stamped with the current year.
    pub fn instructions(&self) -> String {
        let year = Utc::now().year();
        match self {
            Platform::Instagram => format!(
                "Generate Instagram content that:
- Has a powerful first sentence hook
- Uses 2-3 short paragraphs (max 2200 characters)
- Includes 3-5 relevant emojis strategically placed
- Contains bullet points for key takeaways
- Ends with 15-20 targeted hashtags
- Includes a clear call-to-action
- Uses line breaks for readability
- References current {year} trends
- Maintains professional but engaging tone
Do not ask questions or seek clarification. Generate definitive content."
            ),
            Platform::InstagramReels => format!(
                "Generate Instagram Reels script that:
- Opens with a 3-second attention-grabbing hook
- Includes 15-30 second script timing
- Contains 3-4 key points or revelations
- Uses trending audio/music suggestions
- Incorporates popular {year} Reels formats
- Includes text overlay suggestions
- Adds 10-15 trending Reels hashtags
- Specifies transition effects
- Ends with strong call-to-action
- Maximum 150 words for entire script
Generate ready-to-film content without questions."
            ),
            Platform::Youtube => format!(
                "Create YouTube video content that:
- Has an attention-grabbing title (max 60 characters)
- Includes compelling thumbnail text suggestions
- Contains detailed video script with timestamps
- Provides B-roll suggestions
- Includes chapter markers every 3-4 minutes
- Features detailed video description (2000 characters)
- Contains 8-10 relevant tags
- Includes end screen suggestions
- Features cards and timestamp links
- References current {year} trends
- Optimizes for YouTube SEO
- Suggests video length (10-15 minutes)
Generate complete video package without questions."
            ),
            Platform::YoutubeShorts => format!(
                "Create YouTube Shorts content that:
- Has a 1-second hook opening
- Contains 30-60 second detailed script
- Includes text overlay placement
- Suggests trending music/sounds
- Uses pattern interrupts every 2-3 seconds
- Contains vertical framing instructions
- Includes trending hashtags (3-5)
- Features quick-cut editing suggestions
- Ends with subscribe call-to-action
- Optimizes for {year} Shorts algorithm
Generate ready-to-film content without questions."
            ),
            Platform::Twitter => format!(
                "Create Twitter content that:
- Opens with high-impact first tweet
- Structures thread in 5-7 tweets
- Each tweet maximum 280 characters
- Uses line breaks for readability
- Incorporates relevant data points
- Includes 2-3 engaging hooks
- Uses 3-4 relevant hashtags
- Adds appropriate emojis
- Ends with clear call-to-action
- References {year} trends
Generate complete thread without questions."
            ),
            Platform::Linkedin => format!(
                "Create LinkedIn content that:
- Opens with a compelling business insight
- Uses data-driven statements and statistics
- Includes 4-6 paragraphs with professional analysis
- Highlights industry implications
- Uses bullet points for key takeaways
- References relevant {year} market trends
- Includes 3-5 strategic hashtags
- Ends with a professional call-to-action
- Maintains executive-level tone
- Uses white space for readability
Generate authoritative content without seeking clarification."
            ),
            Platform::Tiktok => format!(
                "Create TikTok content that:
- Starts with immediate pattern interrupt (2 seconds)
- Includes 15-60 second script timing
- Features trending sound suggestions
- Contains text overlay placements
- Uses popular {year} TikTok formats
- Incorporates transition suggestions
- Adds 4-5 trending hashtags
- Features viral hooks
- Includes editing suggestions
- Ends with strong call-to-action
Generate viral-optimized content without questions."
            ),
            Platform::Medium => format!(
                "Create a comprehensive Medium article that:
- Has a compelling headline and subheading
- Opens with a strong hook paragraph
- Contains 1500-2000 words of detailed analysis
- Uses H2 and H3 subheadings throughout
- Includes relevant statistics and data
- References expert opinions and sources
- Contains real-world examples and case studies
- Incorporates {year} industry trends
- Uses transition sentences between sections
- Ends with actionable insights
- Maintains journalistic quality throughout
Generate complete, self-contained content without questions."
            ),
            Platform::Wordpress => format!(
                "Create SEO-optimized WordPress content that:
- Contains SEO title and meta description
- Features long-tail keyword optimization
- Includes 1200-1800 words of content
- Uses proper heading hierarchy (H1-H4)
- Incorporates internal and external links
- Features optimized image alt texts
- Contains table of contents structure
- Includes featured image suggestions
- Adds category and tag recommendations
- Optimizes for {year} SEO trends
Generate complete blog post without questions."
            ),
            Platform::Substack => format!(
                "Create Substack newsletter content that:
- Has compelling subject line
- Opens with personal/engaging intro
- Contains 800-1200 words of insights
- Includes section breaks with subheadings
- Features exclusive analysis
- Incorporates reader engagement elements
- Adds premium content section
- Uses newsletter-optimized formatting
- Ends with discussion prompt
- References {year} developments
Generate complete newsletter without questions."
            ),
            Platform::Website => format!(
                "Create website content that:
- Contains SEO-optimized headlines
- Features compelling value proposition
- Includes proper meta descriptions
- Uses conversion-focused copywriting
- Incorporates relevant keywords
- Features clear navigation structure
- Adds call-to-action buttons
- Optimizes for {year} web standards
- Includes technical SEO elements
Generate complete web copy without questions."
            ),
            Platform::LandingPage => format!(
                "Create landing page content that:
- Has attention-grabbing headline
- Features compelling sub-headline
- Includes unique value propositions
- Contains benefit-focused bullet points
- Features social proof elements
- Incorporates trust indicators
- Adds multiple call-to-action variations
- Uses persuasive copywriting techniques
- Includes FAQ section
- Optimizes for {year} conversion rates
Generate high-converting copy without questions."
            ),
            Platform::Email => format!(
                "Create email marketing content that:
- Has high-impact subject line
- Includes preview text optimization
- Contains personalization elements
- Features compelling opening line
- Uses short, scannable paragraphs
- Incorporates social proof
- Adds urgency elements
- Features multiple call-to-action placements
- Includes P.S. section
- Optimizes for {year} email trends
Generate complete email without questions."
            ),
            Platform::PodcastScript => format!(
                "Create podcast script that:
- Includes show intro and outro
- Features episode hook (30 seconds)
- Contains topic breakdown
- Includes interview questions/talking points
- Adds transition sentences
- Features ad placement suggestions
- Incorporates listener engagement points
- Includes show notes
- References {year} trends
- Suggests episode length (30-45 minutes)
Generate complete episode script without questions."
            ),
            Platform::VideoScript => format!(
                "Create video script that:
- Opens with attention hook
- Includes shot-by-shot breakdown
- Contains camera angle suggestions
- Features B-roll recommendations
- Adds music/sound effect cues
- Incorporates graphics placement
- Includes timing for each section
- Features dialogue/voiceover text
- References {year} video trends
- Suggests video length
Generate complete video script without questions."
            ),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
