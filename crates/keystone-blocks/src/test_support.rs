//! Fakes shared by the unit tests.

use crate::behavior::Actor;

pub(crate) struct TestActor {
    pub yaw: f32,
    pub pitch: f32,
    pub creative: bool,
    pub notices: Vec<String>,
}

impl TestActor {
    pub fn looking(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            creative: false,
            notices: Vec::new(),
        }
    }
}

impl Actor for TestActor {
    fn name(&self) -> &str {
        "tester"
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn is_inventory_exempt(&self) -> bool {
        self.creative
    }

    fn orientation(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }
}
