use crate::raster::indexed::{IndexedImage, TRANSPARENT_INDEX};

/// Running reference of what a viewer currently sees, threaded through the frame fold.
#[derive(Clone, Debug)]
struct Reference {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Reference {
    fn from_image(img: &IndexedImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().to_vec(),
        }
    }

    fn matches(&self, img: &IndexedImage) -> bool {
        self.width == img.width() && self.height == img.height()
    }
}

/// Replace pixels that did not change since the last visible state with the transparent
/// sentinel, so a "keep previous frame" container only stores the deltas.
///
/// The first frame is left untouched. A frame whose size differs from the running
/// reference restarts the reference and is left untouched too. Applying the pass to its
/// own output changes nothing.
pub fn optimize_frames<'a, I>(images: I)
where
    I: IntoIterator<Item = &'a mut IndexedImage>,
{
    let _ = images
        .into_iter()
        .fold(None::<Reference>, |reference, img| match reference {
            Some(mut r) if r.matches(img) => {
                diff_in_place(&mut r.pixels, img.pixels_mut());
                Some(r)
            }
            _ => Some(Reference::from_image(img)),
        });
}

fn diff_in_place(reference: &mut [u8], frame: &mut [u8]) {
    for (seen, px) in reference.iter_mut().zip(frame.iter_mut()) {
        if *px == *seen {
            *px = TRANSPARENT_INDEX;
        } else {
            *seen = *px;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/optimize.rs"]
mod tests;
