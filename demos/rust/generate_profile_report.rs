/// Example: full profile report for a user with a few cars and a long
/// maintenance history, enough to run over several pages.
///
/// Run with:
///   cargo run --example generate_profile_report -p pdf-demos
///
/// Opens output at: demos/output/user-profile.pdf
use chrono::{Duration, NaiveDate};
use profile_pdf::{CarSummary, DocumentKind, MaintenanceSummary, ProfileReport, UserSummary};
use uuid::Uuid;

const KINDS: [&str; 5] = ["OIL_CHANGE", "TIRE_ROTATION", "BRAKES", "INSPECTION", "BATTERY"];

/// A 96x96 RGB gradient, encoded as PNG.
fn avatar_png() -> Vec<u8> {
    let (w, h) = (96u32, 96u32);
    let mut pixels = Vec::with_capacity((w * h * 3) as usize);
    for y in 0..h {
        for x in 0..w {
            pixels.extend_from_slice(&[(x * 255 / w) as u8, (y * 255 / h) as u8, 160]);
        }
    }
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, w, h);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("png header");
        writer.write_image_data(&pixels).expect("png data");
    }
    out
}

fn sample_report() -> ProfileReport {
    let joined = NaiveDate::from_ymd_opt(2023, 4, 2)
        .and_then(|d| d.and_hms_opt(9, 15, 0))
        .expect("valid date");

    let user = UserSummary {
        id: Uuid::new_v4(),
        username: Some("jdoe".to_string()),
        email: Some("jane.doe@example.com".to_string()),
        role: Some("USER".to_string()),
        created_on: Some(joined),
        ..Default::default()
    };

    let fleet = [("Audi", "A4", 2019), ("Skoda", "Octavia", 2021), ("Volvo", "V70", 2008)];
    let cars: Vec<CarSummary> = fleet
        .iter()
        .enumerate()
        .map(|(i, (brand, model, year))| CarSummary {
            id: Uuid::new_v4(),
            brand: brand.to_string(),
            model: model.to_string(),
            year: Some(*year),
            vin: format!("WVWZZZ1JZXW{:06}", i + 1),
            joined_at: Some(joined + Duration::days(30 * i as i64)),
            maintenance_count: 8,
        })
        .collect();

    let start = NaiveDate::from_ymd_opt(2023, 5, 1).expect("valid date");
    let mut records: Vec<MaintenanceSummary> = (0..24)
        .map(|i| {
            let car = &cars[i % cars.len()];
            let date = start + Duration::days(21 * i as i64);
            MaintenanceSummary {
                id: Uuid::new_v4(),
                car_id: Some(car.id),
                car_brand: Some(car.brand.clone()),
                car_model: Some(car.model.clone()),
                date: Some(date),
                maintenance_type: Some(KINDS[i % KINDS.len()].to_string()),
                description: (i % 4 == 0).then(|| {
                    "Replaced worn parts, checked fluid levels, reset the service \
                     indicator and road-tested the vehicle before handing it back"
                        .to_string()
                }),
                mileage: 42_000 + 1_350 * i as i64,
                cost: (i % 3 != 0).then_some(49.9 + 17.5 * i as f64),
                next_due_date: Some(date + Duration::days(365)),
            }
        })
        .collect();

    // A record whose car was deleted.
    records.push(MaintenanceSummary {
        id: Uuid::new_v4(),
        mileage: 12_000,
        cost: Some(15.0),
        ..Default::default()
    });

    let generated = NaiveDate::from_ymd_opt(2024, 6, 30)
        .and_then(|d| d.and_hms_opt(18, 45, 0));
    ProfileReport::summarize(Some(user), cars, records, generated)
}

fn main() {
    std::fs::create_dir_all("demos/output").unwrap();
    let path = format!("demos/output/{}", DocumentKind::ProfileReport.file_name());

    let avatar = avatar_png();
    let pdf = profile_pdf::render(Some(avatar.as_slice()), &sample_report()).expect("render report");
    std::fs::write(&path, &pdf).expect("write PDF");
    println!("Written to {} ({} bytes)", path, pdf.len());
}
