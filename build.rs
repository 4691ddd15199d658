//! Retrieves information about the version of the crate from Git and the
//! build environment. This information is written to the output directory and
//! can be accessed at runtime by the command-line interface.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
