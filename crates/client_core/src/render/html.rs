use shared::protocol::{SectionImage, SectionImages};

use super::{Block, RenderedDocument, RenderedSection};

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

impl RenderedDocument {
    /// Markup for the document view, with each section's attached images.
    pub fn to_html(&self, images: &SectionImages) -> String {
        let mut out = String::with_capacity(4 * 1024);
        out.push_str("<div class=\"story-container\">");
        out.push_str(&format!("<h2>{}</h2>", escape_html(&self.title)));
        for section in &self.sections {
            let attached = images.get(&section.id).map(Vec::as_slice).unwrap_or_default();
            push_section(&mut out, section, attached);
        }
        out.push_str("</div>");
        out
    }
}

fn push_section(out: &mut String, section: &RenderedSection, images: &[SectionImage]) {
    let id = escape_html(section.id.as_str());
    out.push_str(&format!(
        "<div class=\"story-section\" data-section=\"{id}\"><div class=\"section-header\"><h3>{}</h3></div>",
        escape_html(&section.title)
    ));
    for block in &section.blocks {
        push_block(out, block);
    }
    out.push_str(&format!("<div class=\"section-images\" id=\"images-{id}\">"));
    for (index, image) in images.iter().enumerate() {
        out.push_str(&format!(
            "<figure class=\"section-image\" data-index=\"{index}\"><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>",
            escape_html(&image.data),
            escape_html(&image.name),
            escape_html(&image.caption)
        ));
    }
    out.push_str("</div></div>");
}

fn push_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { text } => out.push_str(&format!("<h4>{}:</h4>", escape_html(text))),
        Block::Paragraph { text } => out.push_str(&format!("<p>{}</p>", escape_html(text))),
        Block::List { items } => {
            out.push_str("<ul>");
            for item in items {
                out.push_str(&format!("<li>{}</li>", escape_html(item)));
            }
            out.push_str("</ul>");
        }
        Block::Table { columns, rows } => {
            out.push_str("<table><tr>");
            for column in columns {
                out.push_str(&format!("<th>{}</th>", escape_html(column)));
            }
            out.push_str("</tr>");
            for row in rows {
                out.push_str("<tr>");
                for cell in row {
                    out.push_str(&format!("<td>{}</td>", escape_html(cell)));
                }
                out.push_str("</tr>");
            }
            out.push_str("</table>");
        }
    }
}
