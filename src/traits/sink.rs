use crate::core::Frame;

/// Destination for rendered frames (the transport side of a session)
pub trait FrameSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Deliver one frame
    fn present(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    // Mock sink for testing trait implementation
    struct CollectingSink {
        sizes: Vec<(u32, u32)>,
    }

    impl FrameSink for CollectingSink {
        type Error = Infallible;

        fn present(&mut self, frame: &Frame) -> Result<(), Infallible> {
            self.sizes.push((frame.width, frame.height));
            Ok(())
        }
    }

    #[test]
    fn test_sink_receives_frames() {
        let mut sink = CollectingSink { sizes: Vec::new() };
        let frame = Frame::new(0, 0.0, 0.001, 2, 1, vec![0; 6]);

        sink.present(&frame).unwrap();
        sink.present(&frame).unwrap();

        assert_eq!(sink.sizes, vec![(2, 1), (2, 1)]);
    }
}
