use thiserror::Error;

use crate::engine::CanvasPos;

/// Failures reported by the drawing engine.
///
/// Every variant is detected before the grid is touched, so a failed
/// operation leaves the stored canvas as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("Height or Width of Canvas must be greater than 0")]
    InvalidGeometry { width: i32, height: i32 },

    #[error("Canvas of {width}x{height} is too large.")]
    CanvasTooLarge { width: i32, height: i32 },

    #[error("Canvas Not Found. Please create canvas first.")]
    NoCanvas,

    #[error("Invalid inputs. Coordinates are beyond canvas borders.")]
    OutOfBounds { pos: CanvasPos },

    #[error("Invalid inputs. x1 and y1 must be less than x2 and y2 respectively.")]
    InvalidOrder { start: CanvasPos, end: CanvasPos },

    #[error("Invalid inputs. Only horizontal and vertical lines are supported.")]
    UnsupportedSlope { start: CanvasPos, end: CanvasPos },

    #[error("Invalid input. Color must not be {0}")]
    ReservedColor(char),
}

pub type DrawResult<T> = Result<T, DrawError>;
