use crate::geometry::Winding;

use super::face::Face;

/// Derives the boundary polygon of every face.
///
/// Each face starts from a polygon covering its whole plane and is clipped
/// by every other face's plane. Duplicate planes keep only the first face;
/// a face facing directly against another never contributes.
pub(super) fn build_windings(faces: &[Face]) -> Vec<Winding> {
    (0..faces.len()).map(|i| build_winding(faces, i)).collect()
}

fn build_winding(faces: &[Face], index: usize) -> Winding {
    let Some(plane) = faces[index].plane() else {
        return Winding::default();
    };

    let mut winding = Winding::for_plane(plane);
    for (j, other) in faces.iter().enumerate() {
        if j == index {
            continue;
        }
        let Some(clip) = other.plane() else {
            continue;
        };
        if plane.equals(clip) {
            if j < index {
                return Winding::default();
            }
            continue;
        }
        if plane.opposes(clip) {
            return Winding::default();
        }
        winding.clip(clip);
        if winding.is_empty() {
            break;
        }
    }

    if winding.is_polygon() {
        winding
    } else {
        Winding::default()
    }
}
