//! Print the OpenAPI document as JSON.

use std::io;

use shoplist::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}
