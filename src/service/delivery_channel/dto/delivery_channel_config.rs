pub struct DeliveryChannelConfig {
    /// Messages buffered per topic before slow subscribers start lagging
    pub capacity: usize,
}
