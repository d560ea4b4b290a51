//! Rendering lookup answers for the terminal

use crate::lookup::{Answer, Link};
use colored::*;

pub const NO_MATCH_MESSAGE: &str = "Query didn't match any entity";

/// One `[`key`](url)` line per link
pub fn render_links(links: &[Link]) -> String {
    links
        .iter()
        .map(|link| format!("[`{}`]({})", link.key, link.url))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_answer(answer: &Answer) -> String {
    match answer {
        Answer::Homepage { url } => url.to_string(),
        Answer::Matches { links } => {
            format!("{} {}\n{}", "🔗".cyan(), "Links".bold(), render_links(links))
        }
        Answer::NoMatch => format!("{} {}", "ℹ️".blue(), NO_MATCH_MESSAGE),
    }
}

pub fn render_json(answer: &Answer) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn links() -> Vec<Link> {
        vec![
            Link {
                key: "Client".to_string(),
                url: "https://discordpy.readthedocs.io/en/latest/api.html#discord.Client".to_string(),
            },
            Link {
                key: "Client.run".to_string(),
                url: "https://discordpy.readthedocs.io/en/latest/api.html#discord.Client.run"
                    .to_string(),
            },
        ]
    }

    #[test]
    fn test_render_links() {
        assert_eq!(
            render_links(&links()),
            "[`Client`](https://discordpy.readthedocs.io/en/latest/api.html#discord.Client)\n\
             [`Client.run`](https://discordpy.readthedocs.io/en/latest/api.html#discord.Client.run)"
        );
        assert_eq!(render_links(&[]), "");
    }

    #[test]
    fn test_homepage_is_bare_url() {
        colored::control::set_override(false);
        let answer = Answer::Homepage {
            url: Url::parse("https://docs.python.org/3").unwrap(),
        };
        assert_eq!(render_answer(&answer), "https://docs.python.org/3");
    }

    #[test]
    fn test_json_answer() {
        let json = render_json(&Answer::Matches { links: links() }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "matches");
        assert_eq!(value["links"][1]["key"], "Client.run");

        let json = render_json(&Answer::NoMatch).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "no_match");

        let json = render_json(&Answer::Homepage {
            url: Url::parse("https://docs.python.org/3").unwrap(),
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "homepage");
        assert_eq!(value["url"], "https://docs.python.org/3");
    }
}
