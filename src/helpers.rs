pub fn index2d(height: usize, width: usize) -> impl Iterator<Item = (usize, usize, usize)>{
    (0..(width*height)).map(move |idx|{
        let x = idx % width;
        let y = (idx - x) / width;
        (idx, y, x)
    })
}

pub trait Stats {
    fn mean(self) -> f32;
}

impl Stats for std::slice::Iter<'_, f32>{
    fn mean(self) -> f32{
        let lenght = self.len();
        if lenght == 0{
            return 0.0
        }
        // accumulate in f64, lightness lists can be long
        let sum: f64 = self.map(|v| *v as f64).sum();
        return (sum/lenght as f64) as f32
    }
}
