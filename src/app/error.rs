use std::fmt::Display;

#[derive(Debug)]
pub enum PipCountError {
    CaptureUnavailable(i32),
    Vision(opencv::Error),
    Display(opencv::Error),
}

impl Display for PipCountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CaptureUnavailable(device) => {
                write!(f, "Capture device {} could not be opened", device)
            }
            Self::Vision(e) => write!(f, "Vision Error: {}", e),
            Self::Display(e) => write!(f, "Display Error: {}", e),
        }
    }
}

impl std::error::Error for PipCountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CaptureUnavailable(_) => None,
            Self::Vision(e) | Self::Display(e) => Some(e),
        }
    }
}

impl From<opencv::Error> for PipCountError {
    fn from(e: opencv::Error) -> Self {
        Self::Vision(e)
    }
}
