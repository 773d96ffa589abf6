/// Widget content drawn into the GUI each frame
pub trait Gui {
    /// Issue widgets for one pass
    fn draw(&mut self, ctx: &egui::Context);
}

impl<F: FnMut(&egui::Context)> Gui for F {
    fn draw(&mut self, ctx: &egui::Context) {
        self(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_guis() {
        let mut calls = 0;
        {
            let mut gui = |_: &egui::Context| calls += 1;
            let ctx = egui::Context::default();
            gui.draw(&ctx);
            gui.draw(&ctx);
        }
        assert_eq!(calls, 2);
    }
}
