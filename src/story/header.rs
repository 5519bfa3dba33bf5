//! Read story wide options from the header block.

use crate::{
    consts::{
        BACKGROUND_COLOR, LINK_STYLE_TEXT, OPTION_COLOR, OPTION_DEFAULT_DISABLE, OPTION_FONT,
        OPTION_FONT_SIZE, OPTION_HOVER_COLOR, OUTPUT_FONT, OUTPUT_FONT_SIZE,
    },
    error::{MetaData, StoryError},
    log::{Logger, Warning},
    story::types::{StorySettings, TextStyle, ThemeColor},
};

#[derive(Clone, Debug, Default, PartialEq)]
/// Settings and initial styles set by the header.
pub struct HeaderOptions {
    pub settings: StorySettings,
    pub output_style: TextStyle,
    pub option_style: TextStyle,
    pub option_highlight_style: TextStyle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Which theme a color directive applies to.
enum Theme {
    Both,
    Light,
    Dark,
}

/// Read all directives in a header.
///
/// Directives are matched by the first word of their line. Malformed directives are
/// returned as errors and skipped, unknown lines are logged as warnings.
pub fn parse_header(
    header: &str,
    meta_data: &MetaData,
    logger: &mut Logger,
) -> (HeaderOptions, Vec<StoryError>) {
    let mut options = HeaderOptions::default();
    let mut errors = Vec::new();

    for (i, line) in header.lines().enumerate() {
        let line_meta_data = meta_data.offset(i);

        if let Err(error) = parse_directive(line, &line_meta_data, &mut options, logger) {
            errors.push(error);
        }
    }

    (options, errors)
}

fn parse_directive(
    line: &str,
    meta_data: &MetaData,
    options: &mut HeaderOptions,
    logger: &mut Logger,
) -> Result<(), StoryError> {
    let line = line.trim();

    let (directive, value) = match line.find(char::is_whitespace) {
        Some(index) => (&line[..index], line[index..].trim()),
        None => (line, ""),
    };

    if directive.is_empty() {
        return Ok(());
    }

    if let Some((name, theme)) = split_theme(directive) {
        let color = parse_color(value).ok_or_else(|| StoryError::InvalidColor {
            value: value.to_string(),
            meta_data: meta_data.clone(),
        })?;

        let target = match name {
            OPTION_COLOR => &mut options.option_style.color,
            OPTION_HOVER_COLOR => &mut options.option_highlight_style.color,
            _ => &mut options.settings.background_color,
        };

        set_theme_color(target, &color, theme);

        return Ok(());
    }

    match directive {
        LINK_STYLE_TEXT => options.settings.discrete_inline_links = true,
        OPTION_DEFAULT_DISABLE => options.settings.hide_restart_link = true,
        OUTPUT_FONT_SIZE => {
            options.output_style.font_size = Some(parse_font_size(value, meta_data)?);
        }
        OPTION_FONT_SIZE => {
            let size = parse_font_size(value, meta_data)?;

            options.option_style.font_size = Some(size);
            options.option_highlight_style.font_size = Some(size);
        }
        OPTION_FONT => {
            options.option_style.font = Some(value.to_string());
            options.option_highlight_style.font = Some(value.to_string());
        }
        OUTPUT_FONT => options.output_style.font = Some(value.to_string()),
        _ => logger.add_warning(
            Warning::UnknownHeaderDirective {
                line: line.to_string(),
            },
            meta_data,
        ),
    }

    Ok(())
}

/// Split a color directive into its base name and the theme it applies to.
fn split_theme(directive: &str) -> Option<(&'static str, Theme)> {
    [OPTION_COLOR, OPTION_HOVER_COLOR, BACKGROUND_COLOR]
        .iter()
        .find_map(|&name| {
            let suffix = directive.strip_prefix(name)?;

            match suffix {
                "" => Some((name, Theme::Both)),
                "-light" => Some((name, Theme::Light)),
                "-dark" => Some((name, Theme::Dark)),
                _ => None,
            }
        })
}

fn set_theme_color(target: &mut ThemeColor, color: &str, theme: Theme) {
    match theme {
        Theme::Both => *target = ThemeColor::unified(color),
        Theme::Light => target.light = Some(color.to_string()),
        Theme::Dark => target.dark = Some(color.to_string()),
    }
}

/// Read a color given as 3 or 6 hexadecimal digits. The digits are lowercased.
pub(crate) fn parse_color(value: &str) -> Option<String> {
    let value = value.trim();

    if (value.len() == 3 || value.len() == 6) && value.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(value.to_lowercase())
    } else {
        None
    }
}

fn parse_font_size(value: &str, meta_data: &MetaData) -> Result<f64, StoryError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|size| size.is_finite() && *size > 0.0)
        .ok_or_else(|| StoryError::InvalidFontSize {
            value: value.to_string(),
            meta_data: meta_data.clone(),
        })
}
