/// Fixed-size window over the latest samples, oldest evicted first
pub struct History {
    pub values: Vec<f32>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(10)
    }
}

impl History {
    pub fn new(size: usize) -> Self {
        Self {
            values: vec![0.0; size],
        }
    }

    pub fn add_value(&mut self, value: f32) {
        self.values.rotate_left(1);
        if let Some(last) = self.values.last_mut() {
            *last = value;
        }
    }

    pub fn avg(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f32>() / self.values.len() as f32
    }
}
