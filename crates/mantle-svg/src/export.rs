use crate::util::{attr_value_range, escape_xml, escape_xml_into, start_tag_end};
use crate::{Error, Result};
use mantle_core::headless::ElementState;
use mantle_core::{Diagram, HeadlessPage};
use std::ops::Range;

const RESPONSIVE_STYLE: &str = "width:100%;height:auto";
const ASPECT_RATIO: &str = "xMidYMid meet";

#[derive(Debug)]
struct Edit {
    range: Range<usize>,
    text: String,
}

/// Writes the overlay marks recorded on `page` for `diagram` back into its SVG markup.
///
/// Every element with an anchor gets its recorded attributes (replacing same-named ones) and,
/// when set, a `<title>` first child. The root `<svg>` is made responsive: it scales to the
/// container width and keeps its aspect ratio.
pub fn write_marks(diagram: &Diagram, page: &HeadlessPage) -> Result<String> {
    let markup = diagram.markup().ok_or(Error::MissingMarkup)?;
    let doc = roxmltree::Document::parse(markup)?;
    let root = doc
        .descendants()
        .find(|n| n.has_tag_name("svg"))
        .ok_or(Error::MissingRoot)?;

    let mut edits = Vec::new();
    responsive_root(markup, root.range().start, &mut edits)?;

    let mut marked = 0usize;
    for element in diagram.elements() {
        let (Some(anchor), Some(state)) = (element.anchor, page.element(element.id)) else {
            continue;
        };
        if state.attributes.is_empty() && state.title.is_none() {
            continue;
        }
        mark_tag(markup, anchor, state, &mut edits)?;
        marked += 1;
    }

    edits.sort_by(|a, b| b.range.start.cmp(&a.range.start));
    let mut out = markup.to_string();
    for edit in edits {
        out.replace_range(edit.range, &edit.text);
    }
    tracing::debug!(
        instance = %diagram.instance(),
        generation = %diagram.generation(),
        marked,
        "wrote overlay marks"
    );
    Ok(out)
}

fn tag_bounds(markup: &str, anchor: usize) -> Result<(usize, bool)> {
    if !markup.get(anchor..).is_some_and(|s| s.starts_with('<')) {
        return Err(Error::UnknownAnchor { anchor });
    }
    let end = start_tag_end(markup, anchor).ok_or(Error::UnknownAnchor { anchor })?;
    let self_closing = markup.as_bytes()[end - 1] == b'/';
    Ok((end, self_closing))
}

fn tag_name(tag: &str) -> &str {
    let name = &tag[1..];
    let end = name
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .unwrap_or(name.len());
    &name[..end]
}

/// Replaces existing attribute values in place and returns the markup for missing ones.
fn set_attributes<'a>(
    markup: &str,
    anchor: usize,
    end: usize,
    attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
    edits: &mut Vec<Edit>,
) -> String {
    let tag = &markup[anchor..=end];
    let mut appended = String::new();
    for (name, value) in attributes {
        match attr_value_range(tag, name) {
            Some(range) => edits.push(Edit {
                range: anchor + range.start..anchor + range.end,
                text: escape_xml(value),
            }),
            None => {
                appended.push(' ');
                appended.push_str(name);
                appended.push_str("=\"");
                escape_xml_into(&mut appended, value);
                appended.push('"');
            }
        }
    }
    appended
}

fn mark_tag(markup: &str, anchor: usize, state: &ElementState, edits: &mut Vec<Edit>) -> Result<()> {
    let (end, self_closing) = tag_bounds(markup, anchor)?;
    let name = tag_name(&markup[anchor..end]).to_string();
    let appended = set_attributes(
        markup,
        anchor,
        end,
        state
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str())),
        edits,
    );
    let title = state
        .title
        .as_deref()
        .map(|t| format!("<title>{}</title>", escape_xml(t)));

    if self_closing {
        let mut text = appended;
        match title {
            Some(title) => {
                text.push('>');
                text.push_str(&title);
                text.push_str("</");
                text.push_str(&name);
                text.push('>');
            }
            None => text.push_str("/>"),
        }
        edits.push(Edit {
            range: end - 1..end + 1,
            text,
        });
        return Ok(());
    }

    if !appended.is_empty() {
        edits.push(Edit {
            range: end..end,
            text: appended,
        });
    }
    if let Some(title) = title {
        let range = existing_title(markup, end + 1).unwrap_or(end + 1..end + 1);
        edits.push(Edit { range, text: title });
    }
    Ok(())
}

/// Range of a `<title>` element that is the first child of the element whose content starts
/// at `content_start`.
fn existing_title(markup: &str, content_start: usize) -> Option<Range<usize>> {
    let rest = &markup[content_start..];
    let start = content_start + (rest.len() - rest.trim_start().len());
    let after = &markup[start..];
    if !(after.starts_with("<title>") || after.starts_with("<title ") || after.starts_with("<title/"))
    {
        return None;
    }
    let open_end = start_tag_end(markup, start)?;
    if markup.as_bytes()[open_end - 1] == b'/' {
        return Some(start..open_end + 1);
    }
    let close = markup[open_end..].find("</title>")?;
    Some(start..open_end + close + "</title>".len())
}

fn responsive_root(markup: &str, anchor: usize, edits: &mut Vec<Edit>) -> Result<()> {
    let (end, self_closing) = tag_bounds(markup, anchor)?;
    let tag = &markup[anchor..=end];
    let mut appended = String::new();

    match attr_value_range(tag, "style") {
        Some(range) => {
            let current = &tag[range.clone()];
            if !current.replace(' ', "").contains(RESPONSIVE_STYLE) {
                let current = current.trim().trim_end_matches(';');
                let text = if current.is_empty() {
                    RESPONSIVE_STYLE.to_string()
                } else {
                    format!("{current};{RESPONSIVE_STYLE}")
                };
                edits.push(Edit {
                    range: anchor + range.start..anchor + range.end,
                    text,
                });
            }
        }
        None => {
            appended.push_str(" style=\"");
            appended.push_str(RESPONSIVE_STYLE);
            appended.push('"');
        }
    }
    appended.push_str(&set_attributes(
        markup,
        anchor,
        end,
        [("preserveAspectRatio", ASPECT_RATIO)],
        edits,
    ));

    if !appended.is_empty() {
        let at = if self_closing { end - 1 } else { end };
        edits.push(Edit {
            range: at..at,
            text: appended,
        });
    }
    Ok(())
}
