use aerohelper::color_converter::{Color, ColorList, PaletteError};

#[test]
fn hex_palette_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sprites.hex");
    let list = ColorList::from_colors(vec![
        Color::new(15, 56, 15, 255),
        Color::new(155, 188, 15, 0),
    ]);
    list.save_hex(&path).unwrap();
    let back = ColorList::load(&path).unwrap();
    assert_eq!(back, list);
    assert_eq!(back.to_hex_string(), "0x0F380FFF 0x9BBC0F00");
}

#[test]
fn pal_file_imports_256_opaque_colors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unit.pal");
    let bytes: Vec<u8> = (0..768).map(|i| (i % 256) as u8).collect();
    std::fs::write(&path, bytes).unwrap();
    let list = ColorList::load(&path).unwrap();
    assert_eq!(list.len(), 256);
    assert!(list.iter().all(|c| c.a == 255));
    assert_eq!(list.get(0), Some(Color::new(0, 1, 2, 255)));
}

#[test]
fn unknown_extension_is_rejected() {
    let err = ColorList::load(std::path::Path::new("palette.gpl")).unwrap_err();
    assert!(matches!(err, PaletteError::UnsupportedExtension(e) if e == "gpl"));
}
