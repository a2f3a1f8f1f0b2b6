//! Check decoder availability.

use roundscope_frame_source::video::probe_gstreamer;

pub fn run() -> anyhow::Result<()> {
    println!("Roundscope System Check");
    println!("{}", "=".repeat(50));

    match probe_gstreamer() {
        Ok(version) => {
            println!("[OK] GStreamer: {version}");
            println!();
            println!("Decoder stack is available. Roundscope is ready.");
        }
        Err(e) => {
            println!("[FAIL] GStreamer: {e}");
            println!();
            println!("Install the GStreamer runtime and base/good plugin sets.");
        }
    }

    Ok(())
}
