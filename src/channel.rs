//! Release channels and tag classification.
//!
//! A tag's channel is a pure function of its dot-segment count:
//! 3 segments is a stable tag (e.g. "v4.1.2"), 4 segments is a beta tag
//! (e.g. "v4.1.2.1"), anything else is alpha. Prerelease suffixes count
//! too, so "v4.1.2-alpha.1.d001" has 5 segments and lands in alpha,
//! while "v4.1.2-beta.3" has 4 and lands in beta.

use std::fmt;

/// Release maturity tier inferred from tag shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Alpha,
    Beta,
    Stable,
}

impl Channel {
    /// All channels, in output order.
    pub const ALL: [Channel; 3] = [Channel::Alpha, Channel::Beta, Channel::Stable];

    /// Classifies a tag by its dot-segment count.
    pub fn of_tag(tag: &str) -> Channel {
        match tag.split('.').count() {
            3 => Channel::Stable,
            4 => Channel::Beta,
            _ => Channel::Alpha,
        }
    }

    /// File name the channel's version document is written to.
    pub fn file_name(&self) -> &'static str {
        match self {
            Channel::Alpha => "alpha.json",
            Channel::Beta => "beta.json",
            Channel::Stable => "stable.json",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Alpha => write!(f, "alpha"),
            Channel::Beta => write!(f, "beta"),
            Channel::Stable => write!(f, "stable"),
        }
    }
}

/// The newest tag selected for each channel, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelTags {
    pub alpha: Option<String>,
    pub beta: Option<String>,
    pub stable: Option<String>,
}

impl ChannelTags {
    /// Scans tags once and picks at most one per channel, first seen wins.
    ///
    /// A stable tag also satisfies beta and alpha when those are still
    /// unset, and a beta tag also satisfies alpha, since a stricter shape
    /// is an acceptable "newest available" for the looser channels. The
    /// scan stops as soon as all three channels are assigned.
    ///
    /// Precondition: `tags` is in the API's default order, newest first.
    /// No sorting is performed here.
    pub fn select<'a, I>(tags: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut selected = ChannelTags::default();

        for tag in tags {
            match Channel::of_tag(tag) {
                Channel::Stable => {
                    selected.stable.get_or_insert_with(|| tag.to_string());
                    selected.beta.get_or_insert_with(|| tag.to_string());
                    selected.alpha.get_or_insert_with(|| tag.to_string());
                }
                Channel::Beta => {
                    selected.beta.get_or_insert_with(|| tag.to_string());
                    selected.alpha.get_or_insert_with(|| tag.to_string());
                }
                Channel::Alpha => {
                    selected.alpha.get_or_insert_with(|| tag.to_string());
                }
            }

            if selected.is_complete() {
                break;
            }
        }

        selected
    }

    /// The tag selected for a channel, if one was found.
    pub fn get(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Alpha => self.alpha.as_deref(),
            Channel::Beta => self.beta.as_deref(),
            Channel::Stable => self.stable.as_deref(),
        }
    }

    fn is_complete(&self) -> bool {
        self.alpha.is_some() && self.beta.is_some() && self.stable.is_some()
    }
}
