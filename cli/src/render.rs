//! Text and CSV output
//!
//! Totals are shown rounded up to whole rupees, per-kg figures and
//! intermediate lines with two decimals.

use parcel_rate_core::{
    ceil_currency, LoadedTable, RateBreakdown, RateQuote, Route, RouteRates, ScaleCode,
    TableOrigin,
};
use std::io::{self, Write};

fn money(value: f64) -> String {
    format!("₹{:.2}", value)
}

fn total(value: f64) -> String {
    format!("₹{:.0}", ceil_currency(value))
}

pub fn route_label(route: &Route) -> String {
    match &route.via {
        Some(via) => format!("{} → {} ({} km via {})", route.from, route.to, route.distance_km, via),
        None => format!("{} → {} ({} km)", route.from, route.to, route.distance_km),
    }
}

pub fn write_origin_note(out: &mut impl Write, origin: &TableOrigin) -> io::Result<()> {
    if let TableOrigin::BuiltInDefault { reason } = origin {
        writeln!(out, "Note: using built-in rate table ({})", reason)?;
        writeln!(out)?;
    }
    Ok(())
}

// ============================================================================
// Quote
// ============================================================================

pub fn write_quote(out: &mut impl Write, quote: &RateQuote) -> io::Result<()> {
    writeln!(out, "Distance: {} km", quote.distance_km)?;
    writeln!(out, "Weight:   {} kg", quote.weight_kg)?;
    writeln!(out)?;

    if quote.scales.len() > 1 {
        write_comparison(out, quote)?;
        writeln!(out)?;
    }

    for breakdown in &quote.scales {
        write_breakdown(out, breakdown)?;
        match breakdown.scale {
            ScaleCode::Luggage => write_luggage(out, quote)?,
            ScaleCode::Premier => write_joint_product(out, quote)?,
            _ => {}
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_comparison(out: &mut impl Write, quote: &RateQuote) -> io::Result<()> {
    writeln!(out, "{:<28} {:>12} {:>12}", "Service", "Total", "Per kg")?;
    for breakdown in &quote.scales {
        writeln!(
            out,
            "{:<28} {:>12} {:>12}",
            breakdown.scale.display_name(),
            total(breakdown.total_rate),
            money(breakdown.rate_per_unit_weight)
        )?;
        if breakdown.scale == ScaleCode::Luggage {
            if let Some(luggage) = &quote.luggage {
                writeln!(
                    out,
                    "{:<28} {:>12} {:>12}",
                    "Luggage (Luggage Scale)",
                    total(luggage.total),
                    money(luggage.rate_per_unit_weight)
                )?;
            }
        }
        if breakdown.scale == ScaleCode::Premier {
            if let Some(jpp) = &quote.joint_product {
                writeln!(
                    out,
                    "{:<28} {:>12} {:>12}",
                    "JPP (Premier Scale)",
                    total(jpp.total),
                    money(jpp.rate_per_unit_weight)
                )?;
            }
        }
    }
    Ok(())
}

fn write_breakdown(out: &mut impl Write, breakdown: &RateBreakdown) -> io::Result<()> {
    writeln!(out, "{} [{}]", breakdown.scale.display_name(), breakdown.scale)?;

    if !breakdown.is_available() {
        writeln!(out, "  No rate available")?;
        return Ok(());
    }

    if let Some(band) = &breakdown.distance_band {
        writeln!(out, "  Distance band:     {} km", band)?;
    }
    for line in &breakdown.lines {
        writeln!(out, "  Slab:              {} @ {}", line.description, money(line.unit_rate))?;
    }
    writeln!(out, "  Base rate:         {}", money(breakdown.base_rate))?;
    writeln!(out, "  DSC (2%):          {}", money(breakdown.development_surcharge))?;
    writeln!(out, "  Rate after DSC:    {}", money(breakdown.rate_after_surcharge))?;
    writeln!(out, "  GST (5%):          {}", money(breakdown.tax))?;
    writeln!(out, "  Total amount:      {}", total(breakdown.total_rate))?;
    writeln!(out, "  Rate per kg:       {}", money(breakdown.rate_per_unit_weight))?;
    Ok(())
}

fn write_luggage(out: &mut impl Write, quote: &RateQuote) -> io::Result<()> {
    let Some(luggage) = &quote.luggage else {
        return Ok(());
    };
    writeln!(out, "  Luggage rate (1.5×): {}", money(luggage.marked_up_rate))?;
    writeln!(out, "  Luggage GST (info):  {}", money(luggage.luggage_tax))?;
    writeln!(out, "  Luggage total:       {}", total(luggage.total))?;
    writeln!(out, "  Luggage per kg:      {}", money(luggage.rate_per_unit_weight))?;
    Ok(())
}

fn write_joint_product(out: &mut impl Write, quote: &RateQuote) -> io::Result<()> {
    let Some(jpp) = &quote.joint_product else {
        return Ok(());
    };
    writeln!(out, "  JPP rate (P + 10%):  {}", money(jpp.base))?;
    writeln!(out, "  JPP DSC (2%):        {}", money(jpp.development_surcharge))?;
    writeln!(out, "  JPP after DSC:       {}", money(jpp.rate_after_surcharge))?;
    writeln!(out, "  JPP GST (5%):        {}", money(jpp.tax))?;
    writeln!(out, "  JPP total:           {}", total(jpp.total))?;
    writeln!(out, "  JPP per kg:          {}", money(jpp.rate_per_unit_weight))?;
    Ok(())
}

// ============================================================================
// Route sheet
// ============================================================================

/// Rounded totals for one route: L, P, R, S, luggage, JPP
fn route_totals(rates: &RouteRates) -> [f64; 6] {
    let scale_total = |scale| {
        rates
            .quote
            .scale(scale)
            .map_or(0.0, RateBreakdown::rounded_total)
    };
    [
        scale_total(ScaleCode::Luggage),
        scale_total(ScaleCode::Premier),
        scale_total(ScaleCode::Rajdhani),
        scale_total(ScaleCode::Standard),
        rates.quote.luggage.as_ref().map_or(0.0, |l| l.total),
        rates.quote.joint_product.as_ref().map_or(0.0, |j| j.total),
    ]
}

const SHEET_COLUMNS: [&str; 6] = ["Luggage", "Premier", "Rajdhani", "Standard", "Lug 1.5x", "JPP"];

pub fn write_route_sheet(out: &mut impl Write, weight_kg: f64, sheet: &[RouteRates]) -> io::Result<()> {
    if sheet.is_empty() {
        writeln!(out, "No routes found")?;
        return Ok(());
    }

    writeln!(out, "Rates for {} kg", weight_kg)?;
    write!(out, "{:>3} {:<6} {:<6} {:<6} {:>6}", "#", "From", "To", "Via", "Km")?;
    for column in SHEET_COLUMNS {
        write!(out, " {:>9}", column)?;
    }
    writeln!(out)?;

    for (index, rates) in sheet.iter().enumerate() {
        let route = &rates.route;
        write!(
            out,
            "{:>3} {:<6} {:<6} {:<6} {:>6}",
            index + 1,
            route.from,
            route.to,
            route.via.as_deref().unwrap_or("-"),
            route.distance_km
        )?;
        for value in route_totals(rates) {
            write!(out, " {:>9}", format!("{:.0}", value))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn write_route_sheet_csv(out: &mut impl Write, sheet: &[RouteRates]) -> io::Result<()> {
    writeln!(out, "#,From,To,Via,Distance (km),{}", SHEET_COLUMNS.join(","))?;
    for (index, rates) in sheet.iter().enumerate() {
        let route = &rates.route;
        let totals: Vec<String> = route_totals(rates)
            .iter()
            .map(|v| format!("{:.0}", v))
            .collect();
        writeln!(
            out,
            "{},{},{},{},{},{}",
            index + 1,
            csv_field(&route.from),
            csv_field(&route.to),
            csv_field(route.via.as_deref().unwrap_or("")),
            route.distance_km,
            totals.join(",")
        )?;
    }
    Ok(())
}

pub fn write_custom_routes(out: &mut impl Write, routes: &[Route]) -> io::Result<()> {
    if routes.is_empty() {
        writeln!(out, "No custom routes")?;
        return Ok(());
    }
    for (index, route) in routes.iter().enumerate() {
        writeln!(out, "{:>3}. {}", index + 1, route_label(route))?;
    }
    Ok(())
}

// ============================================================================
// Table
// ============================================================================

pub fn write_table_summary(out: &mut impl Write, loaded: &LoadedTable) -> io::Result<()> {
    match &loaded.origin {
        TableOrigin::Source(source) => writeln!(out, "Source:      {}", source)?,
        TableOrigin::BuiltInDefault { reason } => {
            writeln!(out, "Source:      built-in ({})", reason)?
        }
    }
    writeln!(out, "Fingerprint: {}", loaded.table.fingerprint())?;
    writeln!(out, "Rates:       {}", loaded.table.rate_count())?;

    let scales: Vec<String> = loaded
        .table
        .scale_codes()
        .map(|s| format!("{} ({})", s, s.display_name()))
        .collect();
    writeln!(out, "Scales:      {}", scales.join(", "))?;

    let bands: Vec<String> = loaded
        .table
        .distance_bands()
        .iter()
        .map(|b| b.to_string())
        .collect();
    writeln!(out, "Distance bands (km): {}", bands.join(", "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcel_rate_core::table::default_table;
    use parcel_rate_core::{RateEngine, RouteBook, ScaleSelection};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_quote_text_includes_derived_products() {
        let table = default_table();
        let engine = RateEngine::new(&table);
        let quote = engine.quote(25.0, 15.0, ScaleSelection::All).unwrap();

        let text = render(|out| write_quote(out, &quote));

        assert!(text.contains("Service"));
        assert!(text.contains("Luggage Scale [L]"));
        assert!(text.contains("Base rate:         ₹15.06"));
        assert!(text.contains("Total amount:      ₹17"));
        assert!(text.contains("Luggage total:"));
        assert!(text.contains("JPP total:"));
    }

    #[test]
    fn test_single_scale_quote_has_no_comparison() {
        let table = default_table();
        let engine = RateEngine::new(&table);
        let quote = engine
            .quote(25.0, 15.0, ScaleSelection::One(ScaleCode::Standard))
            .unwrap();

        let text = render(|out| write_quote(out, &quote));

        assert!(!text.contains("Service"));
        assert!(text.contains("Standard Scale [S]"));
        assert!(!text.contains("JPP"));
    }

    #[test]
    fn test_no_data_scale_is_reported() {
        let table =
            parcel_rate_core::SlabTable::from_json(r#"{"L": {"1-50": {"1-10": 7.53}}}"#).unwrap();
        let engine = RateEngine::new(&table);
        let quote = engine.quote(25.0, 5.0, ScaleSelection::All).unwrap();

        let text = render(|out| write_quote(out, &quote));

        assert!(text.contains("Premier Scale [P]\n  No rate available"));
    }

    #[test]
    fn test_route_sheet_csv() {
        let table = default_table();
        let engine = RateEngine::new(&table);
        let routes = RouteBook::with_defaults().search(None, Some("HRR"));
        let sheet = engine.route_sheet(&routes, 15.0).unwrap();

        let csv = render(|out| write_route_sheet_csv(out, &sheet));
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "#,From,To,Via,Distance (km),Luggage,Premier,Rajdhani,Standard,Lug 1.5x,JPP"
        );
        assert_eq!(lines.len(), 2);
        // L: 15.06 × 1.02 × 1.05 = 16.13 → 17; luggage 24.19 → 25
        assert!(lines[1].starts_with("1,DVG,HRR,,23,17,"));
        assert!(lines[1].contains(",25,"));
    }

    #[test]
    fn test_route_sheet_text_and_empty() {
        let table = default_table();
        let engine = RateEngine::new(&table);
        let sheet = engine
            .route_sheet(RouteBook::with_defaults().routes(), 100.0)
            .unwrap();

        let text = render(|out| write_route_sheet(out, 100.0, &sheet));
        assert!(text.starts_with("Rates for 100 kg"));
        assert_eq!(text.lines().count(), 2 + sheet.len());

        let empty = render(|out| write_route_sheet(out, 100.0, &[]));
        assert_eq!(empty, "No routes found\n");
    }

    #[test]
    fn test_csv_field_escaping() {
        assert_eq!(csv_field("DVG"), "DVG");
        assert_eq!(csv_field("A,B"), "\"A,B\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_table_summary_and_origin_note() {
        let loaded = LoadedTable::built_in();

        let summary = render(|out| write_table_summary(out, &loaded));
        assert!(summary.contains("Source:      built-in"));
        assert!(summary.contains("L (Luggage Scale)"));
        assert!(summary.contains("Distance bands (km): 1-50"));

        let note = render(|out| write_origin_note(out, &loaded.origin));
        assert!(note.starts_with("Note: using built-in rate table"));

        let none = render(|out| write_origin_note(out, &TableOrigin::Source("x".into())));
        assert!(none.is_empty());
    }

    #[test]
    fn test_route_label() {
        let direct = Route::new("DVG", "HVR", 68, None).unwrap();
        assert_eq!(route_label(&direct), "DVG → HVR (68 km)");
        let via = Route::new("DVG", "MYS", 328, Some("HAS")).unwrap();
        assert_eq!(route_label(&via), "DVG → MYS (328 km via HAS)");
    }
}
