//! Show layout parameters for given content lengths.

use varta_layout_core::{fit, FitInput, PresentationParams};

pub fn run(headline_len: usize, body_len: usize, photo: bool, json: bool) -> anyhow::Result<()> {
    let params = fit(FitInput::new(headline_len, body_len, photo));

    if json {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    println!("Input: headline {headline_len} chars, body {body_len} chars, photo: {photo}");
    print_params(&params);
    Ok(())
}

pub fn print_params(params: &PresentationParams) {
    let tier = params.headline_tier;
    println!(
        "  Headline: {:?} ({}px, line height {})",
        tier,
        tier.font_px(),
        tier.line_height()
    );
    println!(
        "  Body: {}px, {} column(s), line height {}",
        params.body_font_px, params.column_count, params.line_height
    );
    if params.photo_height_px > 0 {
        println!("  Photo height: {}px", params.photo_height_px);
    }
}
