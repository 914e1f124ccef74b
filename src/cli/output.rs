use std::path::Path;

use console::style;
use moji::catalog::{EmojiSource, Payload};
use moji::encode::Encoder;
use moji::prelude::*;
use moji::text::{AttributedString, StyledText};

/// Flattens expanded text back into plain text, writing each attachment as its payload.
pub fn render(text: &AttributedString, encoder: &dyn Encoder) -> Result<String> {
    let mut out = String::with_capacity(text.as_str().len());

    for (slice, run) in text.runs() {
        match run.attachment() {
            Some(attachment) => {
                let source = attachment.decode(encoder)?;
                out.push_str(&describe(&source));
            }
            None => out.push_str(slice),
        }
    }

    Ok(out)
}

/// How an emoji is written out in plain text.
pub fn describe(source: &EmojiSource) -> String {
    match source {
        EmojiSource::Direct(Payload::Character(c)) => c.clone(),
        EmojiSource::Direct(Payload::ImageUrl(url)) => format!("![]({url})"),
        EmojiSource::Direct(Payload::ImageAsset(name)) => format!("![]({name})"),
        EmojiSource::Alias(target) => format!(":{target}:"),
    }
}

pub fn header(path: &Path, substituted: usize, unresolved: usize) {
    println!(
        "{} {}",
        style(path.display()).bold().bright(),
        style(format!("[{substituted} expanded, {unresolved} unresolved]")).dim()
    );
}

pub fn lookup(name: &str, source: &EmojiSource, resolved: &EmojiSource) {
    let kind = match resolved {
        EmojiSource::Direct(Payload::Character(_)) => "character",
        EmojiSource::Direct(Payload::ImageUrl(_)) => "image (url)",
        EmojiSource::Direct(Payload::ImageAsset(_)) => "image (asset)",
        EmojiSource::Alias(_) => "alias",
    };

    print!("{} ", style(format!(":{name}:")).bold().bright());
    if let Some(target) = source.alias() {
        print!("{} ", style(format!("-> :{target}:")).dim());
    }
    println!("{} {}", describe(resolved), style(format!("[{kind}]")).green());
}
