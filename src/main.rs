use glowfield::GlowField;

fn main() {
    if let Err(e) = GlowField::new().run() {
        eprintln!("glowfield: {}", e);
        std::process::exit(1);
    }
}
