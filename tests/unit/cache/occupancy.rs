//! Tests for the color class occupancy bitset

#[cfg(test)]
mod tests {
    use photomosaic::cache::ColorClassOccupancy;
    use photomosaic::color::ColorClassId;

    // Tests a new occupancy vector is empty
    // Verified by initializing bits to one
    #[test]
    fn test_new_is_empty() {
        let occupancy = ColorClassOccupancy::new(125);
        assert!(occupancy.is_empty());
        assert_eq!(occupancy.total_classes(), 125);
        assert_eq!(occupancy.occupied_count(), 0);
        assert!(!occupancy.is_occupied(ColorClassId::new(0)));
    }

    // Tests occupancy mirrors the inserted classes
    // Verified by setting the wrong bit index
    #[test]
    fn test_from_classes() {
        let classes = [100, 20, 4, 20].map(ColorClassId::new);
        let occupancy = ColorClassOccupancy::from_classes(125, classes);

        assert_eq!(occupancy.occupied_count(), 3);
        assert!(occupancy.is_occupied(ColorClassId::new(4)));
        assert!(occupancy.is_occupied(ColorClassId::new(20)));
        assert!(occupancy.is_occupied(ColorClassId::new(100)));
        assert!(!occupancy.is_occupied(ColorClassId::new(99)));
        assert_eq!(
            occupancy.occupied_classes(),
            vec![
                ColorClassId::new(4),
                ColorClassId::new(20),
                ColorClassId::new(100)
            ]
        );
    }

    // Tests classes outside the tracked range are ignored
    // Verified by removing the bounds check in insert
    #[test]
    fn test_out_of_range_class() {
        let mut occupancy = ColorClassOccupancy::new(8);
        occupancy.insert(ColorClassId::new(8));
        assert!(occupancy.is_empty());
        assert!(!occupancy.is_occupied(ColorClassId::new(500)));
    }

    // Tests display summary
    // Verified by swapping counts in the message
    #[test]
    fn test_display() {
        let occupancy = ColorClassOccupancy::from_classes(8, [ColorClassId::new(1)]);
        assert_eq!(
            occupancy.to_string(),
            "ColorClassOccupancy(1/8 classes occupied)"
        );
    }
}
