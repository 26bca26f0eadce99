//! Shared fixtures for unit tests.
//!
//! Two stations reporting between 2016-08-22 and 2017-08-23. The latest date is 2017-08-23, so
//! the lookback window starts at 2016-08-23 and the first row falls outside it. USC00519281 is
//! the most active station (5 rows against 3) and reports twice on 2017-08-23.

use crate::types::measurement::Measurement;
use crate::types::station::Station;

pub(crate) const WAIKIKI: &str = "USC00519397";
pub(crate) const WAIHEE: &str = "USC00519281";

pub(crate) fn fixture_measurements() -> Vec<Measurement> {
    vec![
        Measurement::new(WAIKIKI, "2016-08-22", Some(0.5), 75.0),
        Measurement::new(WAIKIKI, "2016-08-23", Some(0.0), 81.0),
        Measurement::new(WAIHEE, "2016-08-23", Some(1.79), 77.0),
        Measurement::new(WAIHEE, "2017-01-01", None, 62.0),
        Measurement::new(WAIHEE, "2017-08-22", Some(0.0), 76.0),
        Measurement::new(WAIKIKI, "2017-08-23", Some(0.0), 81.0),
        Measurement::new(WAIHEE, "2017-08-23", Some(0.45), 79.0),
        Measurement::new(WAIHEE, "2017-08-23", Some(0.1), 76.0),
    ]
}

pub(crate) fn fixture_stations() -> Vec<Station> {
    vec![
        Station::new(WAIKIKI)
            .with_name("WAIKIKI 717.2, HI US")
            .with_location(21.2716, -157.8168, 3.0),
        Station::new(WAIHEE)
            .with_name("WAIHEE 837.5, HI US")
            .with_location(21.45167, -157.84889, 32.9),
    ]
}
