//! Edge case tests for bbmark.
//!
//! Runs raw BBCode and stored XML through a reader and the Markdown writer.

use bbmark::bbcode::{self, ReaderOptions};
use bbmark::markdown;
use bbmark::xml;
use bbmark::{ConvertOptions, LookupTables, QuotedPost, WarningKind};

/// Convert BBCode with default options and no lookups.
fn bb(input: &str) -> String {
    let root = bbcode::parse(input).unwrap().value;
    markdown::convert_plain(&root, &ConvertOptions::default())
}

/// Convert stored XML with default options and no lookups.
fn stored(input: &str) -> String {
    let root = xml::parse(input).unwrap().value;
    markdown::convert_plain(&root, &ConvertOptions::default())
}

mod unicode {
    use super::*;

    #[test]
    fn test_emoji_kept() {
        assert_eq!(bb("Hello 👋 [i]world[/i]"), "Hello 👋 _world_");
    }

    #[test]
    fn test_cjk_in_bold() {
        assert_eq!(bb("[b]日本語[/b]"), "**日本語**");
    }

    #[test]
    fn test_rtl_text() {
        assert_eq!(bb("[i]مرحبا[/i] שלום"), "_مرحبا_ שלום");
    }

    #[test]
    fn test_ideographic_space_moves_outside() {
        assert_eq!(bb("a[b]\u{3000}b[/b]"), "a\u{3000}**b**");
    }

    #[test]
    fn test_combining_characters() {
        assert_eq!(bb("[u]e\u{301}[/u]"), "[u]e\u{301}[/u]");
    }
}

mod escaping {
    use super::*;

    #[test]
    fn test_markdown_specials_not_escaped() {
        assert_eq!(bb("2 * 3 _ [x]"), "2 * 3 _ [x]");
    }

    #[test]
    fn test_stored_entities_decoded() {
        assert_eq!(stored("<t>Tom &amp;amp; Jerry</t>"), "Tom & Jerry");
    }

    #[test]
    fn test_bbcode_entities_decoded() {
        assert_eq!(bb("a &lt; b"), "a < b");
    }

    #[test]
    fn test_code_keeps_brackets() {
        assert_eq!(bb("[code][b]x[/b][/code]"), "```\n[b]x[/b]\n```");
    }

    #[test]
    fn test_code_with_fence_inside() {
        assert_eq!(bb("[code]```\nx[/code]"), "````\n```\nx\n````");
    }
}

mod structure {
    use super::*;

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(bb("[b]Hello[/b] [i]world[/i]"), "**Hello** _world_");
    }

    #[test]
    fn test_whitespace_inside_tags() {
        assert_eq!(bb("This is [b]bold [/b]text"), "This is **bold** text");
    }

    #[test]
    fn test_deeply_nested_same_tag() {
        let input = format!("{}x{}", "[b]".repeat(20), "[/b]".repeat(20));
        assert_eq!(bb(&input), "**x**");
    }

    #[test]
    fn test_list_between_paragraphs() {
        assert_eq!(
            bb("Intro\n[list]\n[*]a\n[*]b\n[/list]\nafter"),
            "Intro\n\n* a\n* b\n\nafter"
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(bb("[list=1][*]one[*]two[/list]"), "1. one\n2. two");
    }

    #[test]
    fn test_nested_lists() {
        assert_eq!(
            bb("[list][*]a[list][*]b[/list][*]c[/list]"),
            "* a\n  * b\n* c"
        );
    }

    #[test]
    fn test_nested_quotes() {
        assert_eq!(
            bb("[quote]outer[quote]inner[/quote][/quote]"),
            "> outer\n>\n> > inner"
        );
    }

    #[test]
    fn test_quote_by_name_then_reply() {
        assert_eq!(
            bb("[quote=alice]hi[/quote]\nreply"),
            "[quote=\"alice\"]\nhi\n[/quote]\n\nreply"
        );
    }

    #[test]
    fn test_line_break_runs() {
        assert_eq!(bb("a\nb"), "a\nb");
        assert_eq!(bb("a\n\nb"), "a\n\nb");
        assert_eq!(bb("a\n\n\nb"), "a\n\\\n\\\nb");
    }

    #[test]
    fn test_trailing_breaks_dropped() {
        assert_eq!(bb("a\n\n\n"), "a");
    }

    #[test]
    fn test_video() {
        assert_eq!(
            bb("[youtube]https://www.youtube.com/watch?v=abc[/youtube]"),
            "https://www.youtube.com/watch?v=abc"
        );
    }

    #[test]
    fn test_stored_post_with_markers() {
        assert_eq!(
            stored("<r><B><s>[b]</s>Hello<e>[/b]</e></B> world<br/>\nbye</r>"),
            "**Hello** world\nbye"
        );
    }
}

mod resolvers {
    use super::*;

    #[test]
    fn test_smilie_replaced() {
        let options = ReaderOptions::default().with_smilies([":)"]);
        let root = bbcode::parse_with_options("hi :)", &options).unwrap().value;
        let mut tables = LookupTables::default();
        tables.smilies.insert(":)".into(), ":slight_smile:".into());

        let markdown = markdown::convert(&root, &tables, &ConvertOptions::default()).unwrap();
        assert_eq!(markdown, "hi :slight_smile:");
    }

    #[test]
    fn test_quoted_post_resolved() {
        let root = bbcode::parse(r#"[quote="alice" post_id=12 user_id=3]x[/quote]"#)
            .unwrap()
            .value;
        let mut tables = LookupTables::default();
        tables.posts.insert(
            "12".into(),
            QuotedPost {
                username: "bob".into(),
                post_number: 4,
                topic_id: 99,
            },
        );

        let markdown = markdown::convert(&root, &tables, &ConvertOptions::default()).unwrap();
        assert_eq!(markdown, "[quote=\"bob, post:4, topic:99\"]\nx\n[/quote]");
    }

    #[test]
    fn test_username_preferred_over_author() {
        let root = bbcode::parse(r#"[quote="alice" user_id=3]x[/quote]"#)
            .unwrap()
            .value;
        let mut tables = LookupTables::default();
        tables.users.insert("3".into(), "carol".into());

        let markdown = markdown::convert(&root, &tables, &ConvertOptions::default()).unwrap();
        assert_eq!(markdown, "[quote=\"carol\"]\nx\n[/quote]");
    }
}

mod malformed {
    use super::*;

    #[test]
    fn test_unclosed_tag_closed_at_end() {
        let result = bbcode::parse("[b]never closed").unwrap();
        assert!(matches!(
            result.warnings[0].kind,
            WarningKind::UnclosedTag(_)
        ));
        let markdown = markdown::convert_plain(&result.value, &ConvertOptions::default());
        assert_eq!(markdown, "**never closed**");
    }

    #[test]
    fn test_unclosed_link() {
        assert_eq!(
            bb("[url=http://x.example]unterminated"),
            "[unterminated](http://x.example)"
        );
    }

    #[test]
    fn test_stray_close_kept() {
        assert_eq!(bb("a[/b]c"), "a[/b]c");
    }

    #[test]
    fn test_unknown_tag_kept() {
        assert_eq!(bb("[spoiler]x[/spoiler]"), "[spoiler]x[/spoiler]");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(bb(""), "");
        assert_eq!(stored("<t></t>"), "");
    }

    #[test]
    fn test_only_whitespace() {
        assert_eq!(bb("\n\n   \n"), "");
    }

    #[test]
    fn test_broken_xml_is_error() {
        assert!(xml::parse("<r><B>x</r>").is_err());
    }
}
