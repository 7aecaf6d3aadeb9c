use crate::brush::Brush;
use crate::operations::classify::classify_plane;
use crate::operations::query::BoundingBox;

/// Result of carving one brush with another.
#[derive(Debug, Clone)]
pub enum SubtractOutcome {
    /// The cutter does not reach the subject; it stays as it was.
    Untouched,
    /// The pieces of the subject outside the cutter.
    ///
    /// An empty list means the cutter swallowed the subject whole.
    Carved(Vec<Brush>),
}

impl SubtractOutcome {
    /// Returns `true` if the subject was left alone.
    #[must_use]
    pub fn is_untouched(&self) -> bool {
        matches!(self, Self::Untouched)
    }
}

/// Subtracts a convex cutter from a convex subject.
///
/// Walks the cutter's faces in order. Whenever the part of the subject still
/// inside the cutter so far straddles a face plane, the part in front of the
/// plane is split off as a fragment and the remainder keeps the part behind.
/// What is left after the last face lies inside the cutter and is dropped.
pub struct Subtract<'a> {
    subject: &'a Brush,
    cutter: &'a Brush,
}

impl<'a> Subtract<'a> {
    /// Creates a new `Subtract` operation (subject - cutter).
    #[must_use]
    pub fn new(subject: &'a Brush, cutter: &'a Brush) -> Self {
        Self { subject, cutter }
    }

    /// Executes the subtraction. The inputs are never modified.
    #[must_use]
    pub fn execute(&self) -> SubtractOutcome {
        let (Some(subject_box), Some(cutter_box)) = (
            BoundingBox::new(self.subject).execute(),
            BoundingBox::new(self.cutter).execute(),
        ) else {
            return SubtractOutcome::Untouched;
        };
        if !subject_box.intersects(&cutter_box) {
            return SubtractOutcome::Untouched;
        }

        let mut fragments = Vec::with_capacity(self.cutter.len());
        let mut remainder = self.subject.clone();

        for cutter_face in self.cutter.contributing_faces() {
            let split = classify_plane(&remainder, cutter_face.plane);
            if split.is_spanning() {
                let mut fragment = remainder.clone();
                if let Some(face) = fragment.add_face(cutter_face.face.clone()) {
                    face.flip();
                }
                fragments.push(fragment);
                remainder.add_face(cutter_face.face.clone());
            } else if split.back == 0 {
                // Entirely in front of one cutter plane: no overlap.
                return SubtractOutcome::Untouched;
            }
        }

        SubtractOutcome::Carved(fragments)
    }
}
