//! Section renderers for the profile report, plus the heading and
//! wrapped-line primitives they share. Each renderer reserves room
//! for its block with `ensure_space` and then draws through the page
//! lifecycle, leaving the cursor below what it wrote.

use std::io;

use pdf_core::{load_image, wrap, BuiltinFont, TextStyle};
use tracing::warn;

use crate::config::ReportConfig;
use crate::format::{format_currency, format_date, format_date_time};
use crate::layout::{DrawOp, PageLifecycle};
use crate::model::{CarSummary, MaintenanceSummary, ProfileReport, UserSummary};

pub const TITLE: &str = "User Profile";

const TITLE_SIZE: f64 = 24.0;
const HEADING_SIZE: f64 = 16.0;
const BODY_SIZE: f64 = 12.0;
const FOOTER_SIZE: f64 = 10.0;

/// Added to a title or heading's font size to get its advance.
const HEADING_LEADING: f64 = 10.0;
const HEADING_GAP: f64 = 5.0;
const SECTION_GAP: f64 = 10.0;
const ENTRY_GAP: f64 = 5.0;
const DETAIL_INDENT: f64 = 10.0;
const AVATAR_GAP: f64 = 20.0;

// Room reserved before each block is started.
const AVATAR_RESERVE: f64 = 30.0;
const USER_INFO_BLOCK: f64 = 100.0;
const STATISTICS_BLOCK: f64 = 80.0;
const LIST_BLOCK: f64 = 150.0;
const CAR_BLOCK: f64 = 100.0;
const MAINTENANCE_BLOCK: f64 = 120.0;
const FOOTER_BLOCK: f64 = 30.0;
const FOOTER_OFFSET: f64 = 20.0;

fn body() -> TextStyle {
    TextStyle::new(BuiltinFont::Helvetica, BODY_SIZE)
}

fn bold() -> TextStyle {
    TextStyle::new(BuiltinFont::HelveticaBold, BODY_SIZE)
}

/// Draw a bold section heading and move below it.
pub fn add_heading(pages: &mut PageLifecycle, text: &str) {
    pages.write(DrawOp::Text {
        text,
        style: TextStyle::new(BuiltinFont::HelveticaBold, HEADING_SIZE),
        indent: 0.0,
        advance: HEADING_SIZE + HEADING_LEADING,
    });
    pages.advance(HEADING_GAP);
}

/// Wrap `text` to the content width and draw it one sub-line at a
/// time, checking for room before each sub-line. Blank text draws
/// nothing but still takes up one line.
pub fn add_line(
    pages: &mut PageLifecycle,
    config: &ReportConfig,
    text: &str,
    style: TextStyle,
    indent: f64,
) -> io::Result<()> {
    let max_width = config.content_width() - indent;
    let lines = wrap(text, style.font, style.font_size, max_width);
    if lines.is_empty() {
        pages.advance(config.line_height);
        return Ok(());
    }
    for line in &lines {
        pages.ensure_space(config.line_height)?;
        pages.write(DrawOp::Text {
            text: line,
            style,
            indent,
            advance: config.line_height,
        });
    }
    Ok(())
}

fn add_detail(pages: &mut PageLifecycle, config: &ReportConfig, text: &str) -> io::Result<()> {
    add_line(pages, config, text, body(), DETAIL_INDENT)
}

pub fn title(pages: &mut PageLifecycle) {
    pages.write(DrawOp::Text {
        text: TITLE,
        style: TextStyle::new(BuiltinFont::HelveticaBold, TITLE_SIZE),
        indent: 0.0,
        advance: TITLE_SIZE + HEADING_LEADING,
    });
}

/// Draw the avatar at the left margin. Bytes that do not decode as
/// an image are skipped and the rest of the report is unaffected.
pub fn avatar(
    pages: &mut PageLifecycle,
    config: &ReportConfig,
    image_bytes: Option<&[u8]>,
) -> io::Result<()> {
    let bytes = match image_bytes {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Ok(()),
    };

    match load_image(bytes.to_vec()) {
        Ok(decoded) => {
            let size = config.avatar_size;
            let image = pages.embed_image(decoded)?;
            pages.ensure_space(size + AVATAR_RESERVE)?;
            pages.write(DrawOp::Image {
                image,
                x: config.margin,
                size,
                advance: size + AVATAR_GAP,
            });
        }
        Err(e) => warn!(error = %e, "skipping avatar that could not be decoded"),
    }
    Ok(())
}

/// Heading plus whichever of username, email, role and creation
/// time are present.
pub fn user_info(
    pages: &mut PageLifecycle,
    config: &ReportConfig,
    user: &UserSummary,
) -> io::Result<()> {
    pages.ensure_space(USER_INFO_BLOCK)?;
    add_heading(pages, "User Information");

    let fields = [
        user.username.as_ref().map(|v| format!("Username: {}", v)),
        user.email.as_ref().map(|v| format!("Email: {}", v)),
        user.role.as_ref().map(|v| format!("Role: {}", v)),
        user.created_on.map(|v| format!("Created on: {}", format_date_time(v))),
    ];
    for line in fields.iter().flatten() {
        add_line(pages, config, line, body(), 0.0)?;
    }
    pages.advance(SECTION_GAP);
    Ok(())
}

pub fn statistics(
    pages: &mut PageLifecycle,
    config: &ReportConfig,
    report: &ProfileReport,
) -> io::Result<()> {
    pages.ensure_space(STATISTICS_BLOCK)?;
    add_heading(pages, "Statistics");
    add_line(
        pages,
        config,
        &format!("Total Cars: {}", report.total_cars),
        body(),
        0.0,
    )?;
    add_line(
        pages,
        config,
        &format!("Total Maintenances: {}", report.total_maintenance_records),
        body(),
        0.0,
    )?;
    if let Some(cost) = report.total_maintenance_cost {
        add_line(
            pages,
            config,
            &format!("Total Maintenance Cost: {}", format_currency(cost)),
            body(),
            0.0,
        )?;
    }
    pages.advance(SECTION_GAP);
    Ok(())
}

/// The car list. Draws nothing at all when there are no cars.
pub fn cars(pages: &mut PageLifecycle, config: &ReportConfig, cars: &[CarSummary]) -> io::Result<()> {
    if cars.is_empty() {
        return Ok(());
    }
    pages.ensure_space(LIST_BLOCK)?;
    add_heading(pages, &format!("Cars ({})", cars.len()));

    for car in cars {
        pages.ensure_space(CAR_BLOCK)?;
        add_line(pages, config, &format!("\u{2022} {}", car.headline()), bold(), 0.0)?;
        add_detail(pages, config, &format!("VIN: {}", car.vin))?;
        if let Some(joined) = car.joined_at {
            add_detail(pages, config, &format!("Added on: {}", format_date_time(joined)))?;
        }
        add_detail(
            pages,
            config,
            &format!("Maintenance Count: {}", car.maintenance_count),
        )?;
        pages.advance(ENTRY_GAP);
    }
    pages.advance(SECTION_GAP);
    Ok(())
}

/// The maintenance list. Draws nothing at all when there are no
/// records.
pub fn maintenance(
    pages: &mut PageLifecycle,
    config: &ReportConfig,
    records: &[MaintenanceSummary],
) -> io::Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    pages.ensure_space(LIST_BLOCK)?;
    add_heading(pages, &format!("Maintenances ({})", records.len()));

    for record in records {
        pages.ensure_space(MAINTENANCE_BLOCK)?;
        let headline = format!("\u{2022} {} {}", record.car_brand(), record.car_model());
        add_line(pages, config, &headline, bold(), 0.0)?;
        add_detail(pages, config, &format!("Type: {}", record.type_label()))?;
        if let Some(date) = record.date {
            add_detail(pages, config, &format!("Date: {}", format_date(date)))?;
        }
        add_detail(pages, config, &format!("Mileage: {} km", record.mileage))?;
        if let Some(cost) = record.cost {
            add_detail(pages, config, &format!("Cost: {}", format_currency(cost)))?;
        }
        if let Some(description) = record.description() {
            add_detail(pages, config, &format!("Description: {}", description))?;
        }
        if let Some(due) = record.next_due_date {
            add_detail(pages, config, &format!("Next Due Date: {}", format_date(due)))?;
        }
        pages.advance(ENTRY_GAP);
    }
    Ok(())
}

/// Italic generation timestamp, drawn a little below the last block.
pub fn footer(pages: &mut PageLifecycle, report: &ProfileReport) -> io::Result<()> {
    let Some(generated_at) = report.generated_at else {
        return Ok(());
    };
    pages.ensure_space(FOOTER_BLOCK)?;
    pages.advance(FOOTER_OFFSET);
    let text = format!("Generated on: {}", format_date_time(generated_at));
    pages.write(DrawOp::Text {
        text: &text,
        style: TextStyle::new(BuiltinFont::HelveticaOblique, FOOTER_SIZE),
        indent: 0.0,
        advance: FOOTER_SIZE + HEADING_LEADING,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> (PageLifecycle, ReportConfig) {
        let config = ReportConfig::default();
        (PageLifecycle::open(&config).unwrap(), config)
    }

    #[test]
    fn heading_advances_by_size_leading_and_gap() {
        let (mut pages, _) = open();
        add_heading(&mut pages, "Statistics");
        assert_eq!(pages.cursor().y, 742.0 - 26.0 - 5.0);
    }

    #[test]
    fn title_advances_by_size_and_leading() {
        let (mut pages, _) = open();
        title(&mut pages);
        assert_eq!(pages.cursor().y, 742.0 - 34.0);
    }

    #[test]
    fn wrapped_line_advances_once_per_sub_line() {
        let (mut pages, config) = open();
        let long = "word ".repeat(200);
        let expected = wrap(&long, BuiltinFont::Helvetica, 12.0, config.content_width()).len();
        assert!(expected > 1);
        add_line(&mut pages, &config, &long, body(), 0.0).unwrap();
        assert_eq!(pages.cursor().y, 742.0 - 20.0 * expected as f64);
    }

    #[test]
    fn blank_line_still_takes_a_line() {
        let (mut pages, config) = open();
        add_line(&mut pages, &config, "   ", body(), 0.0).unwrap();
        assert_eq!(pages.cursor().y, 722.0);
    }

    #[test]
    fn long_field_may_continue_on_next_page() {
        let (mut pages, config) = open();
        title(&mut pages);
        pages.advance(640.0);
        let long = "brake ".repeat(150);
        add_line(&mut pages, &config, &long, body(), 0.0).unwrap();
        assert_eq!(pages.page_count(), 2);
    }

    #[test]
    fn empty_lists_draw_nothing() {
        let (mut pages, config) = open();
        let before = pages.cursor();
        cars(&mut pages, &config, &[]).unwrap();
        maintenance(&mut pages, &config, &[]).unwrap();
        assert_eq!(pages.cursor(), before);
    }

    #[test]
    fn corrupt_avatar_is_skipped() {
        let (mut pages, config) = open();
        let before = pages.cursor();
        avatar(&mut pages, &config, Some(&b"not an image"[..])).unwrap();
        avatar(&mut pages, &config, Some(&[][..])).unwrap();
        avatar(&mut pages, &config, None).unwrap();
        assert_eq!(pages.cursor(), before);
    }

    #[test]
    fn footer_needs_a_timestamp() {
        let (mut pages, _) = open();
        let before = pages.cursor();
        footer(&mut pages, &ProfileReport::default()).unwrap();
        assert_eq!(pages.cursor(), before);
    }
}
