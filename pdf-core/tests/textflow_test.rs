use pdf_core::{wrap, BuiltinFont, FontMetrics};

const FONT: BuiltinFont = BuiltinFont::Helvetica;
const SIZE: f64 = 12.0;

fn normalized(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn short_text_stays_on_one_line() {
    let lines = wrap("Username: jdoe", FONT, SIZE, 512.0);
    assert_eq!(lines, vec!["Username: jdoe"]);
}

#[test]
fn empty_text_produces_no_lines() {
    assert!(wrap("", FONT, SIZE, 512.0).is_empty());
    assert!(wrap("   \t ", FONT, SIZE, 512.0).is_empty());
}

#[test]
fn long_text_wraps_within_width() {
    let text = "Description: replaced front brake pads and discs, flushed brake \
                fluid, checked the handbrake cable and adjusted the rear shoes";
    let lines = wrap(text, FONT, SIZE, 200.0);
    assert!(lines.len() > 1);
    for line in &lines {
        let width = FontMetrics::measure_text(line, FONT, SIZE);
        assert!(width <= 200.0, "line {:?} is {} wide", line, width);
    }
}

#[test]
fn wrapping_never_splits_words() {
    let texts = [
        "Oil change with synthetic 5W-30 and a new filter",
        "a b c d e f g h i j k l m n o p q r s t u v w x y z",
        "  leading and   irregular   spacing  ",
        "Supercalifragilisticexpialidocious is one word",
    ];
    for text in texts {
        for width in [40.0, 120.0, 300.0] {
            let lines = wrap(text, FONT, SIZE, width);
            assert_eq!(lines.join(" "), normalized(text));
            for line in &lines {
                assert!(!line.starts_with(' ') && !line.ends_with(' '));
            }
        }
    }
}

#[test]
fn over_wide_word_sits_alone() {
    let long = "WVWZZZ1JZXW000001";
    let lines = wrap(&format!("VIN {} ok", long), FONT, SIZE, 50.0);
    assert_eq!(lines, vec!["VIN", long, "ok"]);
}

#[test]
fn bold_wraps_sooner_than_regular() {
    let text = "Mileage Mileage Mileage Mileage Mileage Mileage";
    let width = FontMetrics::measure_text(text, FONT, SIZE) + 1.0;
    let regular = wrap(text, FONT, SIZE, width);
    let bold = wrap(text, BuiltinFont::HelveticaBold, SIZE, width);
    assert_eq!(regular.len(), 1);
    assert!(bold.len() > 1);
}

#[test]
fn latin1_text_wraps_within_width() {
    let text = "ÜBERPRÜFUNG ".repeat(20);
    let lines = wrap(&text, FONT, SIZE, 512.0);
    assert!(lines.len() > 1);
    for line in &lines {
        // Ü is drawn with the same advance as U.
        let plain = line.replace('Ü', "U");
        let width = FontMetrics::measure_text(&plain, FONT, SIZE);
        assert!(width <= 512.0, "line {:?} is {} wide", line, width);
        assert_eq!(FontMetrics::measure_text(line, FONT, SIZE), width);
    }
}

#[test]
fn unencodable_text_is_measured_as_drawn() {
    let lines = wrap(&"李 ".repeat(200), FONT, SIZE, 100.0);
    for line in &lines {
        let drawn = "?".repeat(line.chars().filter(|c| *c == '李').count());
        let spaces = " ".repeat(line.matches(' ').count());
        let width = FontMetrics::measure_text(&(drawn + &spaces), FONT, SIZE);
        assert!(width <= 100.0, "line {:?} is {} wide", line, width);
    }
}
