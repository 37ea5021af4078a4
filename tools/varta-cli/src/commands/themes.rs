//! List themes and their palettes.

use varta_clipping_model::Theme;

pub fn run() -> anyhow::Result<()> {
    for theme in Theme::ALL {
        let p = theme.palette();
        println!("{}", theme.label());
        println!("  Page:     {}", p.background);
        println!("  Masthead: {} on {}", p.header_text, p.header_background);
        println!("  Text:     {}", p.text);
        println!("  Accent:   {}", p.accent);
        println!("  Border:   {}", p.border);
        println!("  Strips:   {} on {}", p.strip_text, p.strip_background);
    }
    Ok(())
}
