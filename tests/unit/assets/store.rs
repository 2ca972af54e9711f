use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

struct CountingLoader {
    inner: MemoryImageLoader,
    calls: usize,
}

impl ImageLoader for CountingLoader {
    fn load(&mut self, key: &str) -> PreviewResult<PreparedImage> {
        self.calls += 1;
        self.inner.load(key)
    }
}

#[test]
fn normalize_rel_path_rejects_escape() {
    assert_eq!(normalize_rel_path("a/./b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("../up.png").is_err());
    assert!(normalize_rel_path("   ").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn request_is_idempotent() {
    let mut store = ImageStore::new();
    assert!(store.request("a.png"));
    assert!(!store.request("a.png"));
    assert!(store.has_pending());
    assert!(matches!(store.state("a.png"), Some(ImageState::Pending)));
    assert!(!store.has_texture("a.png"));
}

#[test]
fn pump_reports_each_key_once() {
    let mut inner = MemoryImageLoader::default();
    inner.insert("ok.png", png_bytes(4, 2, [255, 0, 0, 255]));
    let mut loader = CountingLoader { inner, calls: 0 };

    let mut store = ImageStore::new();
    store.request("ok.png");
    store.request("missing.png");

    let events = store.pump(&mut loader);
    assert_eq!(
        events,
        vec![
            ImageEvent::Loaded("ok.png".to_owned()),
            ImageEvent::Failed("missing.png".to_owned()),
        ]
    );
    assert!(!store.has_pending());

    let tex = store.texture("ok.png").unwrap();
    assert_eq!(tex.width, 4.0);
    assert_eq!(tex.height, 2.0);
    assert!(store.has_texture("ok.png"));
    assert!(matches!(store.state("missing.png"), Some(ImageState::Failed)));

    // Failures are remembered and never retried.
    assert!(!store.request("missing.png"));
    assert!(store.pump(&mut loader).is_empty());
    assert_eq!(loader.calls, 2);
}

#[test]
fn insert_ready_skips_loader() {
    let mut store = ImageStore::new();
    store.request("pre.png");
    let img = crate::assets::decode::decode_image(&png_bytes(2, 2, [0, 0, 255, 255])).unwrap();
    store.insert_ready("pre.png", &img).unwrap();
    assert!(!store.has_pending());
    assert!(store.has_texture("pre.png"));
}

#[test]
fn mismatched_prepared_bytes_are_rejected() {
    let bad = PreparedImage {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new(vec![0; 3]),
    };
    assert!(TextureImage::from_prepared(&bad).is_err());
}

#[test]
fn fs_loader_reads_relative_files() {
    let dir = std::env::temp_dir().join(format!("pedalview_store_{}", std::process::id()));
    std::fs::create_dir_all(dir.join("img")).unwrap();
    std::fs::write(dir.join("img/top.png"), png_bytes(3, 3, [0, 255, 0, 255])).unwrap();

    let mut loader = FsImageLoader::new(&dir);
    let img = loader.load("img/top.png").unwrap();
    assert_eq!((img.width, img.height), (3, 3));
    assert!(loader.load("img/none.png").is_err());
    assert!(loader.load("../top.png").is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn clear_forgets_failures() {
    let mut store = ImageStore::new();
    store.request("x.png");
    store.pump(&mut MemoryImageLoader::default());
    store.clear();
    assert!(store.state("x.png").is_none());
    assert!(store.request("x.png"));
}
