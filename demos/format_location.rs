use geofmt::{ISO_HUMAN_LONG, ISO_LONG, ISO_SHORT, Location, LocationFormatter};

fn print(formatter: &LocationFormatter, location: &Location) {
    match formatter.format(location) {
        Ok(text) => println!("{formatter}: '{text}'"),
        Err(e) => println!("{formatter}: {e}"),
    }
}

fn main() {
    let location = Location::new(Some(-33.8568), Some(151.2153), Some(12.5));

    print(&ISO_HUMAN_LONG, &location);
    print(&ISO_SHORT, &location);
    print(&ISO_LONG, &location);

    let formatter = match LocationFormatter::of_pattern("'lat='LL.LLLL' lon='lll.llll") {
        Ok(formatter) => formatter,
        Err(e) => {
            println!("Invalid pattern: {e}");
            return;
        }
    };
    print(&formatter, &location);
    print(&formatter, &Location::of_elevation(12.5));

    for text in ["lat=-33.8568 lon=151.2153", "lat=-33.8568 lon=E151"] {
        match formatter.parse(text) {
            Ok(location) => println!("Parsed '{text}': {location}"),
            Err(e) => println!("Parsing error occurred: {e}"),
        }
    }

    if let Err(e) = LocationFormatter::of_pattern("DD[MM") {
        println!("Invalid pattern: {e}");
    }
}
