mod gallery;

use anyhow::Result;

use esagil_engine::logging::{init_logging, LoggingConfig};
use esagil_scene::prelude::*;

use gallery::{Gallery, TileData};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let tiles: VecModel<TileData> = [
        ("Ziggurat", 0xC8_8A_3C_FF, true),
        ("Ishtar Gate", 0x2E_5E_AA_FF, false),
        ("Etemenanki", 0x8C_6B_4F_FF, false),
        ("Processional Way", 0x5A_7D_5A_FF, true),
        ("Esagila Court", 0xB0_3A_2E_FF, false),
        ("Nabu", 0x6A_4C_93_FF, false),
        ("Euphrates", 0x3C_8D_A8_FF, false),
    ]
    .into_iter()
    .map(|(name, rgba, wide)| TileData::new(name, Color::from_rgba_u32(rgba), wide))
    .collect();

    let gallery = Gallery::new("Esagil");
    gallery.populate(&tiles, 12);
    log::info!("gallery holds {} tiles and {} dots", tiles.count(), 12);

    ComponentWindow::new().run(&*gallery)
}
