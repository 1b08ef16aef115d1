//! Image format detection from file signatures.
//!
//! A [`Sniffer`] holds an ordered list of pure test functions, each looking at
//! the first bytes of a file. Tests run in order and the first match wins.
//! The standard list covers the usual raster formats plus JPEG-2000 and icon
//! containers.

use std::{
    fs::File,
    io::{self, ErrorKind, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{Res, error::Error};

/// Number of leading bytes handed to the signature tests.
pub const HEAD_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Tiff,
    Rgb,
    Pbm,
    Pgm,
    Ppm,
    Rast,
    Xbm,
    Bmp,
    Webp,
    Exr,
    Jp2,
    J2k,
    Ico,
}

impl ImageFormat {
    /// Short lowercase name of the format, e.g. `png` or `jp2`.
    pub fn tag(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Rgb => "rgb",
            ImageFormat::Pbm => "pbm",
            ImageFormat::Pgm => "pgm",
            ImageFormat::Ppm => "ppm",
            ImageFormat::Rast => "rast",
            ImageFormat::Xbm => "xbm",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Webp => "webp",
            ImageFormat::Exr => "exr",
            ImageFormat::Jp2 => "jp2",
            ImageFormat::J2k => "j2k",
            ImageFormat::Ico => "ico",
        }
    }

    /// MIME type used for the multipart upload of a file in this format.
    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Rgb => "image/x-rgb",
            ImageFormat::Pbm => "image/x-portable-bitmap",
            ImageFormat::Pgm => "image/x-portable-graymap",
            ImageFormat::Ppm => "image/x-portable-pixmap",
            ImageFormat::Rast => "image/x-cmu-raster",
            ImageFormat::Xbm => "image/x-xbitmap",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Exr => "image/x-exr",
            ImageFormat::Jp2 => "image/jp2",
            ImageFormat::J2k => "image/x-jp2-codestream",
            ImageFormat::Ico => "image/vnd.microsoft.icon",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A signature test: given the head of a file, the detected format or `None`.
pub type SignatureTest = fn(&[u8]) -> Option<ImageFormat>;

#[derive(Debug, Clone)]
pub struct Sniffer {
    tests: Vec<SignatureTest>,
}

impl Default for Sniffer {
    fn default() -> Self {
        Self::standard()
    }
}

impl Sniffer {
    /// Builds a sniffer running exactly `tests`, in order.
    pub fn new(tests: Vec<SignatureTest>) -> Self {
        Self { tests }
    }

    /// The built-in raster tests followed by the JPEG-2000 and icon tests.
    pub fn standard() -> Self {
        Self::new(vec![
            test_jpeg,
            test_png,
            test_gif,
            test_tiff,
            test_rgb,
            test_pbm,
            test_pgm,
            test_ppm,
            test_rast,
            test_xbm,
            test_bmp,
            test_webp,
            test_exr,
            test_jp2,
            test_j2k,
            test_ico,
        ])
    }

    /// Appends a test. It runs after every test already registered.
    pub fn with_test(mut self, test: SignatureTest) -> Self {
        self.tests.push(test);
        self
    }

    pub fn sniff(&self, head: &[u8]) -> Option<ImageFormat> {
        self.tests.iter().find_map(|test| test(head))
    }

    /// Reads the head of `reader` and classifies it.
    pub fn sniff_reader<R: Read>(&self, reader: R) -> io::Result<Option<ImageFormat>> {
        let head = read_head(reader)?;
        Ok(self.sniff(&head))
    }

    /// Classifies the file at `path`.
    ///
    /// Opening a directory succeeds on most platforms and only reading fails,
    /// so callers see an [`ErrorKind::IsADirectory`] error for directories.
    pub fn sniff_path(&self, path: &Path) -> io::Result<Option<ImageFormat>> {
        let file = File::open(path)?;
        self.sniff_reader(file)
    }
}

fn read_head<R: Read>(reader: R) -> io::Result<Vec<u8>> {
    let mut head = Vec::with_capacity(HEAD_LEN);
    reader.take(HEAD_LEN as u64).read_to_end(&mut head)?;
    Ok(head)
}

fn test_jpeg(h: &[u8]) -> Option<ImageFormat> {
    let jfif = h.get(6..10).is_some_and(|m| m == b"JFIF" || m == b"Exif");
    (jfif || h.starts_with(b"\xFF\xD8\xFF\xDB")).then_some(ImageFormat::Jpeg)
}

fn test_png(h: &[u8]) -> Option<ImageFormat> {
    h.starts_with(b"\x89PNG\r\n\x1A\n")
        .then_some(ImageFormat::Png)
}

fn test_gif(h: &[u8]) -> Option<ImageFormat> {
    (h.starts_with(b"GIF87a") || h.starts_with(b"GIF89a")).then_some(ImageFormat::Gif)
}

fn test_tiff(h: &[u8]) -> Option<ImageFormat> {
    (h.starts_with(b"MM") || h.starts_with(b"II")).then_some(ImageFormat::Tiff)
}

fn test_rgb(h: &[u8]) -> Option<ImageFormat> {
    h.starts_with(b"\x01\xDA").then_some(ImageFormat::Rgb)
}

// Netpbm: `P<digit>` followed by whitespace; digits pick binary/ascii flavour.
fn netpbm(h: &[u8], digits: &[u8]) -> bool {
    h.len() >= 3 && h[0] == b'P' && digits.contains(&h[1]) && b" \t\n\r".contains(&h[2])
}

fn test_pbm(h: &[u8]) -> Option<ImageFormat> {
    netpbm(h, b"14").then_some(ImageFormat::Pbm)
}

fn test_pgm(h: &[u8]) -> Option<ImageFormat> {
    netpbm(h, b"25").then_some(ImageFormat::Pgm)
}

fn test_ppm(h: &[u8]) -> Option<ImageFormat> {
    netpbm(h, b"36").then_some(ImageFormat::Ppm)
}

fn test_rast(h: &[u8]) -> Option<ImageFormat> {
    h.starts_with(b"\x59\xA6\x6A\x95").then_some(ImageFormat::Rast)
}

fn test_xbm(h: &[u8]) -> Option<ImageFormat> {
    h.starts_with(b"#define ").then_some(ImageFormat::Xbm)
}

fn test_bmp(h: &[u8]) -> Option<ImageFormat> {
    h.starts_with(b"BM").then_some(ImageFormat::Bmp)
}

fn test_webp(h: &[u8]) -> Option<ImageFormat> {
    (h.starts_with(b"RIFF") && h.get(8..12) == Some(b"WEBP".as_slice()))
        .then_some(ImageFormat::Webp)
}

fn test_exr(h: &[u8]) -> Option<ImageFormat> {
    h.starts_with(b"\x76\x2F\x31\x01").then_some(ImageFormat::Exr)
}

fn test_jp2(h: &[u8]) -> Option<ImageFormat> {
    h.starts_with(b"\x00\x00\x00\x0CjP  \x0D\x0A\x87\x0A")
        .then_some(ImageFormat::Jp2)
}

fn test_j2k(h: &[u8]) -> Option<ImageFormat> {
    h.starts_with(b"\xFF\x4F\xFF\x51").then_some(ImageFormat::J2k)
}

fn test_ico(h: &[u8]) -> Option<ImageFormat> {
    h.starts_with(b"\x00\x00\x01\x00").then_some(ImageFormat::Ico)
}

/// An open image file whose signature has been verified.
///
/// The handle is positioned at offset 0 when handed out. It is shared behind
/// an [`Arc`] so the value can be cloned by the argument parser.
#[derive(Debug, Clone)]
pub struct ImageFile {
    path: PathBuf,
    format: ImageFormat,
    file: Arc<File>,
}

impl ImageFile {
    /// Opens `path` and accepts it only if `sniffer` recognises its first
    /// [`HEAD_LEN`] bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] naming the path if no signature matches
    /// - [`Error::Io`] if the file cannot be opened or read
    pub fn open(path: impl AsRef<Path>, sniffer: &Sniffer) -> Res<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let head = read_head(&mut file)?;
        let Some(format) = sniffer.sniff(&head) else {
            return Err(Error::Validation(format!(
                "\"{}\" is not a valid image file",
                path.display()
            )));
        };
        file.seek(SeekFrom::Start(0))?;

        Ok(Self::from_parts(path, format, file))
    }

    /// Wraps an already opened `file` known to hold an image of `format`.
    ///
    /// No signature check is made.
    pub fn from_parts(path: impl Into<PathBuf>, format: ImageFormat, file: File) -> Self {
        Self {
            path: path.into(),
            format,
            file: Arc::new(file),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Last component of the path, used as the multipart file name.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Reads the whole file from the start.
    ///
    /// The shared handle is rewound first, so the bytes are complete even if
    /// the file was read before.
    pub fn read_all(&self) -> io::Result<Vec<u8>> {
        let mut file = &*self.file;
        file.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// Drops every path that is not recognised as an image, keeping order.
///
/// Directories and unrecognised files are skipped with a debug log. Any other
/// I/O failure aborts the whole filter.
pub fn retain_images(paths: &mut Vec<PathBuf>, sniffer: &Sniffer) -> Res<()> {
    let mut kept = Vec::with_capacity(paths.len());
    for path in paths.drain(..) {
        match sniffer.sniff_path(&path) {
            Ok(Some(_)) => kept.push(path),
            Ok(None) => log::debug!("Ignoring file \"{}\".", path.display()),
            Err(e) if is_directory_error(&e, &path) => {
                log::debug!("Ignoring directory \"{}\".", path.display())
            }
            Err(e) => return Err(e.into()),
        }
    }
    *paths = kept;
    Ok(())
}

fn is_directory_error(err: &io::Error, path: &Path) -> bool {
    // Windows refuses to open directories with PermissionDenied instead.
    err.kind() == ErrorKind::IsADirectory || (cfg!(windows) && path.is_dir())
}
