//! Reading, writing and comparing image files
//!
//! The format follows the file extension; png is enabled.

use crate::error::Error;
use crate::Pixel;
use crate::PixelData;

use std::path::Path;

/// Read an image as packed RGB bytes, returning (data, width, height)
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<(Vec<u8>,usize,usize), Error> {
    let img = image::open(filename)?.to_rgb8();
    let (w, h) = img.dimensions();
    Ok((img.into_raw(), w as usize, h as usize))
}

/// Write packed RGB bytes
pub fn write_file<P: AsRef<Path>>(buf: &[u8], width: usize, height: usize, filename: P) -> Result<(), Error> {
    debug!("write {}x{} rgb to {}", width, height, filename.as_ref().display());
    image::save_buffer(filename, buf, width as u32, height as u32, image::ColorType::Rgb8)?;
    Ok(())
}

/// Write the contents of a pixel format, RGBA when it carries alpha
pub fn write_pixels<T, P>(pix: &T, filename: P) -> Result<(), Error>
    where T: Pixel + PixelData, P: AsRef<Path>
{
    let ct = if T::bpp() == 4 { image::ColorType::Rgba8 } else { image::ColorType::Rgb8 };
    debug!("write {}x{} {:?} to {}", pix.width(), pix.height(), ct, filename.as_ref().display());
    image::save_buffer(filename, pix.pixeldata(), pix.width() as u32, pix.height() as u32, ct)?;
    Ok(())
}

/// Compare two images, true if the dimensions and every byte match
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool, Error> {
    let (d1,w1,h1) = read_file(f1)?;
    let (d2,w2,h2) = read_file(f2)?;
    if w1 != w2 || h1 != h2 {
        debug!("image sizes differ {}x{} {}x{}", w1, h1, w2, h2);
        return Ok(false);
    }
    let mut flag = true;
    for (i,(v1,v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            debug!("{} [{},{},{}]: {} {}", i, (i/3)%w1, (i/3)/w1, i%3, v1, v2);
            flag = false;
        }
    }
    Ok(flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgb8, Rgba8};
    use crate::pixfmt::Pixfmt;
    use crate::Source;

    fn tmp(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("vraster-{}-{}", std::process::id(), name))
    }

    #[test]
    fn write_read_compare() -> Result<(), Error> {
        let mut pix = Pixfmt::<Rgb8>::new(3, 2);
        pix.fill(Rgb8::new(10, 20, 30));
        pix.copy_pixel(2, 1, Rgb8::white());
        let a = tmp("a.png");
        let b = tmp("b.png");
        write_pixels(&pix, &a)?;
        write_file(pix.pixeldata(), 3, 2, &b)?;
        let (data, w, h) = read_file(&a)?;
        assert_eq!((w, h), (3, 2));
        assert_eq!(&data[..], pix.pixeldata());
        assert!(img_diff(&a, &b)?);

        pix.copy_pixel(0, 0, Rgb8::black());
        write_pixels(&pix, &b)?;
        assert!(! img_diff(&a, &b)?);

        let mut rgba = Pixfmt::<Rgba8>::new(1, 1);
        rgba.fill(Rgba8::new(1, 2, 3, 4));
        write_pixels(&rgba, &b)?;
        let (data, _, _) = read_file(&b)?;
        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(rgba.get((0, 0)).a, 4);

        std::fs::remove_file(&a).ok();
        std::fs::remove_file(&b).ok();
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(matches!(read_file(tmp("missing.png")), Err(Error::Image(_))));
    }
}
